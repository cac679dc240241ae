//! # incidents-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port trait defined in `incidents-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run the embedded migration that creates the `incidents` table
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `incidents-app` (for the port trait) and `incidents-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;

mod incident_repo;

pub use error::StorageError;
pub use incident_repo::SqliteIncidentRepository;
pub use pool::{Config, Database};
