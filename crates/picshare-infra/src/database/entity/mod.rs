//! SeaORM entities, one module per table.

pub mod comment;
pub mod follower;
pub mod like;
pub mod media;
pub mod post;
pub mod story;
pub mod user;
