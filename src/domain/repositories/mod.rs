//! Repository trait definitions for the domain layer.
//!
//! The trait here is the abstract capability interface consumed by the
//! handlers; the PostgreSQL implementation lives in
//! `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests, and an in-memory substitute
//! backs the integration tests under `tests/`.

pub mod camp_repository;

pub use camp_repository::{CampRepository, CampRepositoryFactory, StagedTalk};

#[cfg(test)]
pub use camp_repository::{MockCampRepository, MockCampRepositoryFactory};
