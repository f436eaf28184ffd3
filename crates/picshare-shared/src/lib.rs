//! # Picshare Shared
//!
//! Wire shapes of every record and the functions that produce them.
//! Consumers (an API layer, a job, a test) only ever see these mappings.

pub mod dto;
pub mod serialize;

pub use serialize::to_mapping;
