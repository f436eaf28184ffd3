//! # Picshare Core
//!
//! The domain layer of the Picshare schema.
//! Plain records, repository ports and the operations built on them.
//! This crate has zero infrastructure dependencies.

pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use context::PersistenceContext;
pub use error::{ConstraintKind, DomainError, RepoError};
pub use service::SocialService;
