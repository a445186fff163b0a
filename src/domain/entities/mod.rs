//! Core domain entities representing the conference data model.
//!
//! Entities are plain data structures without persistence logic.
//!
//! # Entity Types
//!
//! - [`Camp`] - A conference camp, identified by its moniker
//! - [`Speaker`] - A speaker, referenced by talks
//! - [`Talk`] - A talk, owned by exactly one camp and one speaker
//!
//! # Design Pattern
//!
//! Creation and partial update use separate structs:
//! - `NewCamp`, `NewTalk` - For staging new records
//! - `CampPatch`, `TalkPatch` - Field-by-field overlays where `None`
//!   means "leave unchanged"

pub mod camp;
pub mod speaker;
pub mod talk;

pub use camp::{Camp, CampPatch, NewCamp};
pub use speaker::Speaker;
pub use talk::{NewTalk, Talk, TalkPatch};
