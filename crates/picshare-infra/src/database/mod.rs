//! SeaORM storage adapter: entities, schema creation and repositories.

mod base_repo;
mod connections;
pub mod entity;
mod repositories;
pub mod schema;

use std::sync::Arc;

use sea_orm::DbConn;

use picshare_core::PersistenceContext;

pub use base_repo::{RecordEntity, SeaOrmBaseRepository};
pub use connections::{DatabaseConfig, connect};
pub use repositories::{
    SeaOrmCommentRepository, SeaOrmFollowRepository, SeaOrmLikeRepository, SeaOrmMediaRepository,
    SeaOrmPostRepository, SeaOrmStoryRepository, SeaOrmUserRepository,
};
pub use schema::create_schema;

/// Build a [`PersistenceContext`] whose repositories all share `db`.
pub fn context(db: DbConn) -> PersistenceContext {
    let db = Arc::new(db);
    PersistenceContext {
        users: Arc::new(SeaOrmUserRepository::new(Arc::clone(&db))),
        posts: Arc::new(SeaOrmPostRepository::new(Arc::clone(&db))),
        media: Arc::new(SeaOrmMediaRepository::new(Arc::clone(&db))),
        comments: Arc::new(SeaOrmCommentRepository::new(Arc::clone(&db))),
        likes: Arc::new(SeaOrmLikeRepository::new(Arc::clone(&db))),
        follows: Arc::new(SeaOrmFollowRepository::new(Arc::clone(&db))),
        stories: Arc::new(SeaOrmStoryRepository::new(db)),
    }
}
