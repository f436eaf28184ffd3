//! User entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use picshare_core::domain::{NewUser, User};

use crate::database::base_repo::RecordEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(80))", unique)]
    pub username: String,
    #[sea_orm(column_type = "String(StringLen::N(120))", unique)]
    pub email: String,
    pub password: String,
    #[sea_orm(column_type = "String(StringLen::N(60))")]
    pub first_name: String,
    #[sea_orm(column_type = "String(StringLen::N(60))")]
    pub last_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub profile_picture: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub website: Option<String>,
    pub is_private: bool,
    pub is_active: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
    #[sea_orm(has_many = "super::story::Entity")]
    Story,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl Related<super::story::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Story.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = User;
    type New = NewUser;
}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password: model.password,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            profile_picture: model.profile_picture,
            website: model.website,
            is_private: model.is_private,
            is_active: model.is_active,
            created_at: Some(model.created_at.and_utc()),
        }
    }
}

/// Conversion from Domain NewUser to SeaORM ActiveModel.
impl From<NewUser> for ActiveModel {
    fn from(user: NewUser) -> Self {
        Self {
            id: NotSet,
            username: Set(user.username),
            email: Set(user.email),
            password: Set(user.password),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            bio: Set(user.bio),
            profile_picture: Set(user.profile_picture),
            website: Set(user.website),
            is_private: Set(user.is_private),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at.unwrap_or_else(Utc::now).naive_utc()),
        }
    }
}
