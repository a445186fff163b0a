//! Domain layer containing the conference data model and access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Camp, speaker, and talk data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits define contracts implemented in
//! [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
