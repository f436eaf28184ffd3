//! Social operations over a [`PersistenceContext`].

use chrono::{DateTime, Utc};

use crate::context::PersistenceContext;
use crate::domain::{
    Comment, CommentWithAuthor, Follow, Like, Media, NewComment, NewFollow, NewLike, NewMedia,
    NewPost, NewStory, NewUser, Post, PostWithRelations, Story, User, UserWithRelations,
};
use crate::error::DomainError;
use crate::ports::{BaseRepository, UserRepository};

pub type DomainResult<T> = Result<T, DomainError>;

/// Creates records and loads them with the relations serializers expect.
///
/// Referenced rows are looked up before insertion so a missing user or post
/// reports [`DomainError::NotFound`]; the store still enforces the same
/// constraints on its own.
#[derive(Clone)]
pub struct SocialService {
    ctx: PersistenceContext,
}

impl SocialService {
    pub fn new(ctx: PersistenceContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &PersistenceContext {
        &self.ctx
    }

    pub async fn register_user(&self, new: NewUser) -> DomainResult<User> {
        if self.ctx.users.find_by_username(&new.username).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "Username '{}' is taken",
                new.username
            )));
        }
        if self.ctx.users.find_by_email(&new.email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }

        let user = self.ctx.users.create(new).await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn create_post(&self, new: NewPost) -> DomainResult<Post> {
        self.require_user(new.user_id).await?;
        let post = self.ctx.posts.create(new).await?;
        tracing::info!(post_id = post.id, user_id = post.user_id, "Post created");
        Ok(post)
    }

    pub async fn attach_media(&self, new: NewMedia) -> DomainResult<Media> {
        self.require_post(new.post_id).await?;
        Ok(self.ctx.media.create(new).await?)
    }

    pub async fn add_comment(&self, new: NewComment) -> DomainResult<Comment> {
        self.require_user(new.user_id).await?;
        self.require_post(new.post_id).await?;
        Ok(self.ctx.comments.create(new).await?)
    }

    pub async fn like_post(&self, new: NewLike) -> DomainResult<Like> {
        self.require_user(new.user_id).await?;
        self.require_post(new.post_id).await?;
        Ok(self.ctx.likes.create(new).await?)
    }

    pub async fn follow_user(&self, new: NewFollow) -> DomainResult<Follow> {
        self.require_user(new.user_from_id).await?;
        self.require_user(new.user_to_id).await?;
        if self
            .ctx
            .follows
            .find_pair(new.user_from_id, new.user_to_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate(format!(
                "User {} already follows user {}",
                new.user_from_id, new.user_to_id
            )));
        }
        Ok(self.ctx.follows.create(new).await?)
    }

    /// Stamps `created_at` here when absent so the expiry check and the
    /// stored row agree on the creation time.
    pub async fn publish_story(&self, mut new: NewStory) -> DomainResult<Story> {
        self.require_user(new.user_id).await?;
        let created_at = *new.created_at.get_or_insert_with(Utc::now);
        if new.expires_at <= created_at {
            return Err(DomainError::Validation(
                "Story must expire after it is created".to_string(),
            ));
        }
        Ok(self.ctx.stories.create(new).await?)
    }

    /// Load a post with its author and media.
    pub async fn load_post(&self, post_id: i32) -> DomainResult<PostWithRelations> {
        let post = self.require_post(post_id).await?;
        let user = self.ctx.users.find_by_id(post.user_id).await?;
        let media = self.ctx.media.find_by_post_id(post.id).await?;
        Ok(PostWithRelations { post, user, media })
    }

    /// Load a comment with its author.
    pub async fn load_comment(&self, comment_id: i32) -> DomainResult<CommentWithAuthor> {
        let comment = self
            .ctx
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Comment",
                id: comment_id,
            })?;
        let user = self.ctx.users.find_by_id(comment.user_id).await?;
        Ok(CommentWithAuthor { comment, user })
    }

    /// Load every comment on a post, each with its author.
    pub async fn load_post_comments(&self, post_id: i32) -> DomainResult<Vec<CommentWithAuthor>> {
        let comments = self.ctx.comments.find_by_post_id(post_id).await?;

        let mut author_ids: Vec<i32> = comments.iter().map(|c| c.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.ctx.users.find_many(&author_ids).await?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let user = authors.iter().find(|u| u.id == comment.user_id).cloned();
                CommentWithAuthor { comment, user }
            })
            .collect())
    }

    /// Load a user with the posts and follow rows that profile counts use.
    pub async fn load_user_profile(&self, user_id: i32) -> DomainResult<UserWithRelations> {
        let user = self.require_user(user_id).await?;
        let posts = self.ctx.posts.find_by_user_id(user_id).await?;
        let followers = self.ctx.follows.followers_of(user_id).await?;
        let following = self.ctx.follows.following_of(user_id).await?;
        Ok(UserWithRelations {
            user,
            posts,
            followers,
            following,
        })
    }

    pub async fn active_stories(&self, user_id: i32, at: DateTime<Utc>) -> DomainResult<Vec<Story>> {
        Ok(self.ctx.stories.find_active_by_user_id(user_id, at).await?)
    }

    async fn require_user(&self, id: i32) -> DomainResult<User> {
        self.ctx
            .users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "User",
                id,
            })
    }

    async fn require_post(&self, id: i32) -> DomainResult<Post> {
        self.ctx
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }
}
