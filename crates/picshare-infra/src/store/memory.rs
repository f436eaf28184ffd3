//! In-memory store implementation - used by tests and when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use picshare_core::domain::{
    Comment, Follow, Like, Media, NewComment, NewFollow, NewLike, NewMedia, NewPost, NewStory,
    NewUser, Post, Story, User,
};
use picshare_core::error::RepoError;
use picshare_core::ports::{
    BaseRepository, CommentRepository, FollowRepository, LikeRepository, MediaRepository,
    PostRepository, StoryRepository, UserRepository,
};

use crate::pii::mask_email;

// Column widths, matching the varchar lengths of the SeaORM entities.
const USERNAME_MAX: usize = 80;
const EMAIL_MAX: usize = 120;
const NAME_MAX: usize = 60;
const URL_MAX: usize = 255;
const LOCATION_MAX: usize = 100;

/// Rows of one table keyed by id, with an auto-increment counter.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }

    fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(pred)
    }

    /// Rows matching `pred`, in id order.
    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| pred(r)).cloned().collect()
    }

    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }
}

struct Tables {
    users: Table<User>,
    posts: Table<Post>,
    media: Table<Media>,
    comments: Table<Comment>,
    likes: Table<Like>,
    follows: Table<Follow>,
    stories: Table<Story>,
}

impl Tables {
    fn require_user(&self, id: i32, column: &str) -> Result<(), RepoError> {
        if self.users.contains(id) {
            Ok(())
        } else {
            Err(RepoError::foreign_key(format!(
                "{} = {} references a missing user",
                column, id
            )))
        }
    }

    fn require_post(&self, id: i32, column: &str) -> Result<(), RepoError> {
        if self.posts.contains(id) {
            Ok(())
        } else {
            Err(RepoError::foreign_key(format!(
                "{} = {} references a missing post",
                column, id
            )))
        }
    }
}

/// In-memory backend enforcing the same unique, foreign-key and width
/// constraints as the relational schema.
///
/// Each instance is fully isolated. Note: Data is lost when it is dropped.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                users: Table::new(),
                posts: Table::new(),
                media: Table::new(),
                comments: Table::new(),
                likes: Table::new(),
                follows: Table::new(),
                stories: Table::new(),
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill in the insertion time when the caller left it empty.
fn stamp(created_at: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    Some(created_at.unwrap_or_else(Utc::now))
}

fn check_width(column: &str, value: &str, max: usize) -> Result<(), RepoError> {
    if value.chars().count() > max {
        Err(RepoError::check(format!(
            "value too long for {} (max {} characters)",
            column, max
        )))
    } else {
        Ok(())
    }
}

fn check_optional_width(column: &str, value: Option<&str>, max: usize) -> Result<(), RepoError> {
    value.map_or(Ok(()), |v| check_width(column, v, max))
}

fn rejected(table: &str, err: RepoError) -> RepoError {
    tracing::warn!(table, error = %err, "Insert rejected");
    err
}

#[async_trait]
impl BaseRepository<User, NewUser, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn create(&self, new: NewUser) -> Result<User, RepoError> {
        check_width("user.username", &new.username, USERNAME_MAX)
            .and_then(|_| check_width("user.email", &new.email, EMAIL_MAX))
            .and_then(|_| check_width("user.first_name", &new.first_name, NAME_MAX))
            .and_then(|_| check_width("user.last_name", &new.last_name, NAME_MAX))
            .and_then(|_| {
                check_optional_width("user.profile_picture", new.profile_picture.as_deref(), URL_MAX)
            })
            .and_then(|_| check_optional_width("user.website", new.website.as_deref(), URL_MAX))
            .map_err(|e| rejected("user", e))?;

        let mut tables = self.tables.write().await;
        if tables.users.any(|u| u.username == new.username) {
            return Err(rejected(
                "user",
                RepoError::unique(format!("username '{}' already exists", new.username)),
            ));
        }
        if tables.users.any(|u| u.email == new.email) {
            return Err(rejected(
                "user",
                RepoError::unique(format!("email '{}' already exists", mask_email(&new.email))),
            ));
        }

        let created_at = stamp(new.created_at);
        Ok(tables
            .users
            .insert_with(|id| new.into_user(id, created_at)))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");
        let tables = self.tables.read().await;
        Ok(tables.users.filter(|u| u.username == username).into_iter().next())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");
        let tables = self.tables.read().await;
        Ok(tables.users.filter(|u| u.email == email).into_iter().next())
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.filter(|u| ids.contains(&u.id)))
    }
}

#[async_trait]
impl BaseRepository<Post, NewPost, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(id))
    }

    async fn create(&self, new: NewPost) -> Result<Post, RepoError> {
        check_optional_width("post.location", new.location.as_deref(), LOCATION_MAX)
            .map_err(|e| rejected("post", e))?;

        let mut tables = self.tables.write().await;
        tables
            .require_user(new.user_id, "post.user_id")
            .map_err(|e| rejected("post", e))?;

        let created_at = stamp(new.created_at);
        Ok(tables
            .posts
            .insert_with(|id| new.into_post(id, created_at)))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.filter(|p| p.user_id == user_id))
    }

    async fn count_by_user_id(&self, user_id: i32) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.rows.values().filter(|p| p.user_id == user_id).count() as u64)
    }
}

#[async_trait]
impl BaseRepository<Media, NewMedia, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Media>, RepoError> {
        Ok(self.tables.read().await.media.get(id))
    }

    async fn create(&self, new: NewMedia) -> Result<Media, RepoError> {
        check_width("media.url", &new.url, URL_MAX).map_err(|e| rejected("media", e))?;

        let mut tables = self.tables.write().await;
        tables
            .require_post(new.post_id, "media.post_id")
            .map_err(|e| rejected("media", e))?;

        let created_at = stamp(new.created_at);
        Ok(tables
            .media
            .insert_with(|id| new.into_media(id, created_at)))
    }
}

#[async_trait]
impl MediaRepository for InMemoryStore {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Media>, RepoError> {
        Ok(self.tables.read().await.media.filter(|m| m.post_id == post_id))
    }
}

#[async_trait]
impl BaseRepository<Comment, NewComment, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(id))
    }

    async fn create(&self, new: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .require_user(new.user_id, "comment.user_id")
            .and_then(|_| tables.require_post(new.post_id, "comment.post_id"))
            .map_err(|e| rejected("comment", e))?;

        let created_at = stamp(new.created_at);
        Ok(tables
            .comments
            .insert_with(|id| new.into_comment(id, created_at)))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.filter(|c| c.post_id == post_id))
    }
}

#[async_trait]
impl BaseRepository<Like, NewLike, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Like>, RepoError> {
        Ok(self.tables.read().await.likes.get(id))
    }

    async fn create(&self, new: NewLike) -> Result<Like, RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .require_user(new.user_id, "like.user_id")
            .and_then(|_| tables.require_post(new.post_id, "like.post_id"))
            .map_err(|e| rejected("like", e))?;
        if tables
            .likes
            .any(|l| l.user_id == new.user_id && l.post_id == new.post_id)
        {
            return Err(rejected(
                "like",
                RepoError::unique(format!(
                    "user {} already likes post {}",
                    new.user_id, new.post_id
                )),
            ));
        }

        let created_at = stamp(new.created_at);
        Ok(tables
            .likes
            .insert_with(|id| new.into_like(id, created_at)))
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Like>, RepoError> {
        Ok(self.tables.read().await.likes.filter(|l| l.post_id == post_id))
    }

    async fn count_by_post_id(&self, post_id: i32) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.rows.values().filter(|l| l.post_id == post_id).count() as u64)
    }
}

#[async_trait]
impl BaseRepository<Follow, NewFollow, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Follow>, RepoError> {
        Ok(self.tables.read().await.follows.get(id))
    }

    async fn create(&self, new: NewFollow) -> Result<Follow, RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .require_user(new.user_from_id, "follower.user_from_id")
            .and_then(|_| tables.require_user(new.user_to_id, "follower.user_to_id"))
            .map_err(|e| rejected("follower", e))?;
        if tables
            .follows
            .any(|f| f.user_from_id == new.user_from_id && f.user_to_id == new.user_to_id)
        {
            return Err(rejected(
                "follower",
                RepoError::unique(format!(
                    "user {} already follows user {}",
                    new.user_from_id, new.user_to_id
                )),
            ));
        }

        let created_at = stamp(new.created_at);
        Ok(tables
            .follows
            .insert_with(|id| new.into_follow(id, created_at)))
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn followers_of(&self, user_id: i32) -> Result<Vec<Follow>, RepoError> {
        Ok(self.tables.read().await.follows.filter(|f| f.user_to_id == user_id))
    }

    async fn following_of(&self, user_id: i32) -> Result<Vec<Follow>, RepoError> {
        Ok(self.tables.read().await.follows.filter(|f| f.user_from_id == user_id))
    }

    async fn find_pair(
        &self,
        user_from_id: i32,
        user_to_id: i32,
    ) -> Result<Option<Follow>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .filter(|f| f.user_from_id == user_from_id && f.user_to_id == user_to_id)
            .into_iter()
            .next())
    }
}

#[async_trait]
impl BaseRepository<Story, NewStory, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Story>, RepoError> {
        Ok(self.tables.read().await.stories.get(id))
    }

    async fn create(&self, new: NewStory) -> Result<Story, RepoError> {
        check_width("story.media_url", &new.media_url, URL_MAX)
            .map_err(|e| rejected("story", e))?;

        let mut tables = self.tables.write().await;
        tables
            .require_user(new.user_id, "story.user_id")
            .map_err(|e| rejected("story", e))?;

        let created_at = stamp(new.created_at);
        Ok(tables
            .stories
            .insert_with(|id| new.into_story(id, created_at)))
    }
}

#[async_trait]
impl StoryRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Story>, RepoError> {
        Ok(self.tables.read().await.stories.filter(|s| s.user_id == user_id))
    }

    async fn find_active_by_user_id(
        &self,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> Result<Vec<Story>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stories
            .filter(|s| s.user_id == user_id && !s.is_expired(at)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use picshare_core::ConstraintKind;
    use picshare_core::domain::MediaType;

    use crate::store;

    fn ana() -> NewUser {
        NewUser::new("ana", "ana@x.com", "hash", "Ana", "Lopez")
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_sequence() {
        let ctx = store::context();
        let first = ctx.users.create(ana()).await.unwrap();
        let second = ctx
            .users
            .create(NewUser::new("bo", "bo@x.com", "hash", "Bo", "Berg"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.created_at.is_some());
    }

    #[tokio::test]
    async fn test_caller_timestamp_is_kept() {
        let ctx = store::context();
        let at = Utc::now() - Duration::days(3);
        let mut new = ana();
        new.created_at = Some(at);

        let user = ctx.users.create(new).await.unwrap();
        assert_eq!(user.created_at, Some(at));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let ctx = store::context();
        ctx.users.create(ana()).await.unwrap();

        let err = ctx
            .users
            .create(NewUser::new("ana", "other@x.com", "hash", "A", "B"))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::Unique));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let ctx = store::context();
        ctx.users.create(ana()).await.unwrap();

        let err = ctx
            .users
            .create(NewUser::new("ana2", "ana@x.com", "hash", "A", "B"))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::Unique));
    }

    #[tokio::test]
    async fn test_overlong_username_rejected() {
        let ctx = store::context();
        let err = ctx
            .users
            .create(NewUser::new("a".repeat(81), "ana@x.com", "hash", "A", "B"))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::Check));
    }

    #[tokio::test]
    async fn test_children_of_missing_rows_rejected() {
        let ctx = store::context();
        let user = ctx.users.create(ana()).await.unwrap();

        let err = ctx.posts.create(NewPost::new(99, None)).await.unwrap_err();
        assert!(err.is_constraint(ConstraintKind::ForeignKey));

        let err = ctx
            .media
            .create(NewMedia::new(99, MediaType::Image, "http://x/1.jpg"))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::ForeignKey));

        let err = ctx
            .comments
            .create(NewComment::new(user.id, 99, "hello"))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::ForeignKey));

        let err = ctx.likes.create(NewLike::new(42, 1)).await.unwrap_err();
        assert!(err.is_constraint(ConstraintKind::ForeignKey));

        let err = ctx
            .follows
            .create(NewFollow::new(user.id, 42))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::ForeignKey));
    }

    #[tokio::test]
    async fn test_pairs_are_unique() {
        let ctx = store::context();
        let ana = ctx.users.create(ana()).await.unwrap();
        let bo = ctx
            .users
            .create(NewUser::new("bo", "bo@x.com", "hash", "Bo", "Berg"))
            .await
            .unwrap();
        let post = ctx.posts.create(NewPost::new(bo.id, None)).await.unwrap();

        ctx.follows.create(NewFollow::new(ana.id, bo.id)).await.unwrap();
        let err = ctx
            .follows
            .create(NewFollow::new(ana.id, bo.id))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::Unique));
        // The reverse direction is a different pair.
        ctx.follows.create(NewFollow::new(bo.id, ana.id)).await.unwrap();

        ctx.likes.create(NewLike::new(ana.id, post.id)).await.unwrap();
        let err = ctx
            .likes
            .create(NewLike::new(ana.id, post.id))
            .await
            .unwrap_err();
        assert!(err.is_constraint(ConstraintKind::Unique));
        assert_eq!(ctx.likes.count_by_post_id(post.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_active_stories_exclude_expired() {
        let ctx = store::context();
        let user = ctx.users.create(ana()).await.unwrap();
        let now = Utc::now();

        ctx.stories
            .create(NewStory::new(user.id, "http://x/old.jpg", now - Duration::hours(1)))
            .await
            .unwrap();
        let fresh = ctx
            .stories
            .create(NewStory::new(user.id, "http://x/new.jpg", now + Duration::hours(5)))
            .await
            .unwrap();

        let active = ctx.stories.find_active_by_user_id(user.id, now).await.unwrap();
        assert_eq!(active, vec![fresh]);
        assert_eq!(ctx.stories.find_by_user_id(user.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_contexts_are_isolated() {
        let first = store::context();
        let second = store::context();
        first.users.create(ana()).await.unwrap();

        assert!(second.users.find_by_username("ana").await.unwrap().is_none());
        // Same username is free in the other store.
        second.users.create(ana()).await.unwrap();
    }
}
