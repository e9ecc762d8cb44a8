//! # Quill Infrastructure
//!
//! Concrete implementations of the repository ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//! - `minimal` - No external dependencies, in-memory store only

pub mod database;

pub use database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresAuthorRepository, PostgresPostRepository};
