//! Schema creation straight from the entity definitions.

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DbBackend, DbConn, DbErr, EntityTrait, Schema, Statement};

use super::entity::{comment, follower, like, media, post, story, user};

/// Name of the unique index over (`user_from_id`, `user_to_id`).
pub const FOLLOWER_PAIR_INDEX: &str = "uq_follower_pair";

/// Name of the unique index over (`user_id`, `post_id`) on `like`.
pub const LIKE_PAIR_INDEX: &str = "uq_like_user_post";

/// Create the media enum type, every table and the pair indexes.
///
/// Safe to run against a database that already has the schema.
pub async fn create_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    if backend == DbBackend::Postgres && !media_type_exists(db).await? {
        let stmt = schema.create_enum_from_active_enum::<media::MediaKind>();
        db.execute(backend.build(&stmt)).await?;
        tracing::info!("Created enum type mediatype");
    }

    // Parents before children so foreign keys resolve.
    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, post::Entity).await?;
    create_table(db, &schema, media::Entity).await?;
    create_table(db, &schema, comment::Entity).await?;
    create_table(db, &schema, like::Entity).await?;
    create_table(db, &schema, follower::Entity).await?;
    create_table(db, &schema, story::Entity).await?;

    for index in pair_indexes() {
        db.execute(backend.build(&index)).await?;
    }

    tracing::info!(backend = ?backend, "Schema ready");
    Ok(())
}

async fn create_table<E>(db: &DbConn, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let table = entity.table_name().to_string();
    let stmt = schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&stmt)).await?;
    tracing::debug!(table = %table, "Table ensured");
    Ok(())
}

fn pair_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name(FOLLOWER_PAIR_INDEX)
            .table(follower::Entity)
            .col(follower::Column::UserFromId)
            .col(follower::Column::UserToId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name(LIKE_PAIR_INDEX)
            .table(like::Entity)
            .col(like::Column::UserId)
            .col(like::Column::PostId)
            .unique()
            .if_not_exists()
            .to_owned(),
    ]
}

async fn media_type_exists(db: &DbConn) -> Result<bool, DbErr> {
    let row = db
        .query_one(Statement::from_string(
            DbBackend::Postgres,
            "SELECT 1 FROM pg_type WHERE typname = 'mediatype'",
        ))
        .await?;
    Ok(row.is_some())
}
