use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, SqlErr,
};

use picshare_core::error::RepoError;
use picshare_core::ports::BaseRepository;

/// Generic SeaORM repository implementation.
///
/// Holds the connection behind an `Arc` so every table repository of a
/// context shares one pool.
pub struct SeaOrmBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: impl Into<Arc<DbConn>>) -> Self {
        Self {
            db: db.into(),
            _entity: PhantomData,
        }
    }
}

/// Translate a SeaORM failure into a [`RepoError`], keeping constraint
/// violations distinguishable from other query failures.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::unique(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::foreign_key(msg),
        _ => {
            let err_str = err.to_string();
            let lowered = err_str.to_lowercase();
            if lowered.contains("duplicate") || lowered.contains("unique") {
                RepoError::unique(err_str)
            } else if lowered.contains("foreign key") {
                RepoError::foreign_key(err_str)
            } else if lowered.contains("value too long") {
                RepoError::check(err_str)
            } else if matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
                RepoError::Connection(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

/// Ties a SeaORM entity to the domain record it stores and the insertion
/// form it accepts.
pub trait RecordEntity: EntityTrait {
    type Record: From<Self::Model> + Send + Sync + 'static;
    type New: Into<Self::ActiveModel> + Send + 'static;
}

#[async_trait]
impl<E> BaseRepository<E::Record, E::New, i32> for SeaOrmBaseRepository<E>
where
    E: RecordEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<E::Record>, RepoError> {
        let result = E::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new: E::New) -> Result<E::Record, RepoError> {
        let active_model: E::ActiveModel = new.into();
        let model = active_model.insert(self.db.as_ref()).await.map_err(|e| {
            let err = map_db_err(e);
            tracing::warn!(table = E::default().table_name(), error = %err, "Insert rejected");
            err
        })?;

        Ok(model.into())
    }
}
