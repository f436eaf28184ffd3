//! # Picshare Infrastructure
//!
//! Concrete implementations of the repository ports defined in `picshare-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - SeaORM entities, schema creation and repositories
//!
//! Without `postgres` only the in-memory store is built.

pub mod pii;
pub mod store;

#[cfg(feature = "postgres")]
pub mod database;

pub use store::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, connect, create_schema};
