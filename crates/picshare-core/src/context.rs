//! Persistence context - the explicit set of repository handles.

use std::sync::Arc;

use crate::ports::{
    CommentRepository, FollowRepository, LikeRepository, MediaRepository, PostRepository,
    StoryRepository, UserRepository,
};

/// One handle per table, built by a storage adapter and passed to whoever
/// needs data access. Cloning is cheap and shares the underlying store.
#[derive(Clone)]
pub struct PersistenceContext {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub media: Arc<dyn MediaRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub stories: Arc<dyn StoryRepository>,
}
