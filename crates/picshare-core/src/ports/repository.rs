use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Comment, Follow, Like, Media, NewComment, NewFollow, NewLike, NewMedia, NewPost, NewStory,
    NewUser, Post, Story, User,
};
use crate::error::RepoError;

/// Generic repository trait shared by every table.
///
/// `T` is the stored record, `N` its insertion form and `ID` the key type.
/// The schema is create-then-read, so there is no update or delete.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity, returning it with its assigned id and timestamp.
    async fn create(&self, new: N) -> Result<T, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser, i32> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Fetch every user whose id is in `ids`, in no particular order.
    async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost, i32> {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;

    async fn count_by_user_id(&self, user_id: i32) -> Result<u64, RepoError>;
}

/// Media repository.
#[async_trait]
pub trait MediaRepository: BaseRepository<Media, NewMedia, i32> {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Media>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, NewComment, i32> {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;
}

/// Like repository.
#[async_trait]
pub trait LikeRepository: BaseRepository<Like, NewLike, i32> {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Like>, RepoError>;

    async fn count_by_post_id(&self, post_id: i32) -> Result<u64, RepoError>;
}

/// Follow repository.
#[async_trait]
pub trait FollowRepository: BaseRepository<Follow, NewFollow, i32> {
    /// Rows where someone follows `user_id`.
    async fn followers_of(&self, user_id: i32) -> Result<Vec<Follow>, RepoError>;

    /// Rows where `user_id` follows someone.
    async fn following_of(&self, user_id: i32) -> Result<Vec<Follow>, RepoError>;

    async fn find_pair(
        &self,
        user_from_id: i32,
        user_to_id: i32,
    ) -> Result<Option<Follow>, RepoError>;
}

/// Story repository.
#[async_trait]
pub trait StoryRepository: BaseRepository<Story, NewStory, i32> {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Story>, RepoError>;

    /// Stories of `user_id` that have not expired at `at`.
    async fn find_active_by_user_id(
        &self,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> Result<Vec<Story>, RepoError>;
}
