//! SeaORM repository implementations, one per table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use picshare_core::domain::{Comment, Follow, Like, Media, Post, Story, User};
use picshare_core::error::RepoError;
use picshare_core::ports::{
    CommentRepository, FollowRepository, LikeRepository, MediaRepository, PostRepository,
    StoryRepository, UserRepository,
};

use super::base_repo::{SeaOrmBaseRepository, map_db_err};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::follower::{self, Entity as FollowerEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::media::{self, Entity as MediaEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::story::{self, Entity as StoryEntity};
use super::entity::user::{self, Entity as UserEntity};
use crate::pii::mask_email;

pub type SeaOrmUserRepository = SeaOrmBaseRepository<UserEntity>;
pub type SeaOrmPostRepository = SeaOrmBaseRepository<PostEntity>;
pub type SeaOrmMediaRepository = SeaOrmBaseRepository<MediaEntity>;
pub type SeaOrmCommentRepository = SeaOrmBaseRepository<CommentEntity>;
pub type SeaOrmLikeRepository = SeaOrmBaseRepository<LikeEntity>;
pub type SeaOrmFollowRepository = SeaOrmBaseRepository<FollowerEntity>;
pub type SeaOrmStoryRepository = SeaOrmBaseRepository<StoryEntity>;

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_user_id(&self, user_id: i32) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl MediaRepository for SeaOrmMediaRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Media>, RepoError> {
        let result = MediaEntity::find()
            .filter(media::Column::PostId.eq(post_id))
            .order_by_asc(media::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LikeRepository for SeaOrmLikeRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .order_by_asc(like::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_post_id(&self, post_id: i32) -> Result<u64, RepoError> {
        LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl FollowRepository for SeaOrmFollowRepository {
    async fn followers_of(&self, user_id: i32) -> Result<Vec<Follow>, RepoError> {
        let result = FollowerEntity::find()
            .filter(follower::Column::UserToId.eq(user_id))
            .order_by_asc(follower::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn following_of(&self, user_id: i32) -> Result<Vec<Follow>, RepoError> {
        let result = FollowerEntity::find()
            .filter(follower::Column::UserFromId.eq(user_id))
            .order_by_asc(follower::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_pair(
        &self,
        user_from_id: i32,
        user_to_id: i32,
    ) -> Result<Option<Follow>, RepoError> {
        let result = FollowerEntity::find()
            .filter(follower::Column::UserFromId.eq(user_from_id))
            .filter(follower::Column::UserToId.eq(user_to_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl StoryRepository for SeaOrmStoryRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Story>, RepoError> {
        let result = StoryEntity::find()
            .filter(story::Column::UserId.eq(user_id))
            .order_by_asc(story::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_active_by_user_id(
        &self,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> Result<Vec<Story>, RepoError> {
        let result = StoryEntity::find()
            .filter(story::Column::UserId.eq(user_id))
            .filter(story::Column::ExpiresAt.gt(at.naive_utc()))
            .order_by_asc(story::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
