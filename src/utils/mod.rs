//! Shared utilities.

pub mod link_generator;

pub use link_generator::LinkGenerator;
