//! Media entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use picshare_core::domain::{Media, MediaType, NewMedia};

use crate::database::base_repo::RecordEntity;

/// Stored form of [`MediaType`]: the `mediatype` enum with upper-case labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "mediatype")]
pub enum MediaKind {
    #[sea_orm(string_value = "IMAGE")]
    Image,
    #[sea_orm(string_value = "VIDEO")]
    Video,
    #[sea_orm(string_value = "CAROUSEL")]
    Carousel,
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => MediaType::Image,
            MediaKind::Video => MediaType::Video,
            MediaKind::Carousel => MediaType::Carousel,
        }
    }
}

impl From<MediaType> for MediaKind {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Image => MediaKind::Image,
            MediaType::Video => MediaKind::Video,
            MediaType::Carousel => MediaKind::Carousel,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    pub media_type: MediaKind,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub url: String,
    pub post_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = Media;
    type New = NewMedia;
}

impl From<Model> for Media {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            media_type: model.media_type.into(),
            url: model.url,
            post_id: model.post_id,
            created_at: Some(model.created_at.and_utc()),
        }
    }
}

impl From<NewMedia> for ActiveModel {
    fn from(media: NewMedia) -> Self {
        Self {
            id: NotSet,
            media_type: Set(media.media_type.into()),
            url: Set(media.url),
            post_id: Set(media.post_id),
            created_at: Set(media.created_at.unwrap_or_else(Utc::now).naive_utc()),
        }
    }
}
