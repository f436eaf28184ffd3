//! Follower entity for SeaORM.
//!
//! `user_from_id` follows `user_to_id`; the pair is unique (see
//! `schema::create_schema`).

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use picshare_core::domain::{Follow, NewFollow};

use crate::database::base_repo::RecordEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follower")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_from_id: i32,
    pub user_to_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserFromId",
        to = "super::user::Column::Id"
    )]
    FollowerUser,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserToId",
        to = "super::user::Column::Id"
    )]
    FollowingUser,
}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = Follow;
    type New = NewFollow;
}

impl From<Model> for Follow {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_from_id: model.user_from_id,
            user_to_id: model.user_to_id,
            created_at: Some(model.created_at.and_utc()),
        }
    }
}

impl From<NewFollow> for ActiveModel {
    fn from(follow: NewFollow) -> Self {
        Self {
            id: NotSet,
            user_from_id: Set(follow.user_from_id),
            user_to_id: Set(follow.user_to_id),
            created_at: Set(follow.created_at.unwrap_or_else(Utc::now).naive_utc()),
        }
    }
}
