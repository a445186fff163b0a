//! HTTP middleware for request processing.

pub mod tracing;
pub mod version;
