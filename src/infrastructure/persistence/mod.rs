//! PostgreSQL persistence layer.
//!
//! Implements the repository traits from [`crate::domain::repositories`]
//! over a `sqlx` connection pool. Staged mutations are committed inside a
//! single transaction per unit of work.

pub mod pg_camp_repository;

pub use pg_camp_repository::{PgCampRepository, PgCampRepositoryFactory};
