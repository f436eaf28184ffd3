//! Story entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use picshare_core::domain::{NewStory, Story};

use crate::database::base_repo::RecordEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "story")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub media_url: String,
    pub created_at: DateTime,
    pub expires_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = Story;
    type New = NewStory;
}

impl From<Model> for Story {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            media_url: model.media_url,
            created_at: Some(model.created_at.and_utc()),
            expires_at: model.expires_at.and_utc(),
        }
    }
}

impl From<NewStory> for ActiveModel {
    fn from(story: NewStory) -> Self {
        Self {
            id: NotSet,
            user_id: Set(story.user_id),
            media_url: Set(story.media_url),
            created_at: Set(story.created_at.unwrap_or_else(Utc::now).naive_utc()),
            expires_at: Set(story.expires_at.naive_utc()),
        }
    }
}
