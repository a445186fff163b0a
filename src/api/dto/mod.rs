//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Conversion from entities is explicit via `From`
//! impls; partial updates convert into the domain patch types.

pub mod camp;
pub mod speaker;
pub mod talk;
