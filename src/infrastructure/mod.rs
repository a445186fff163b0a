//! Infrastructure layer: concrete integrations behind the domain traits.

pub mod persistence;
