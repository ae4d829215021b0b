//! Helpers shared by every SeaORM-backed repository.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait, SqlErr};

use blog_core::error::RepoError;

/// Translate a SeaORM error into the port error type.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            return RepoError::Constraint(format!("duplicate value: {detail}"));
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            return RepoError::MissingReference(detail);
        }
        _ => {}
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}

/// Fetch one row by its integer primary key.
pub(crate) async fn find_by_id<E, C>(db: &C, id: i64) -> Result<Option<E::Model>, RepoError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i64: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id).one(db).await.map_err(map_db_err)
}

/// Delete one row by its integer primary key, failing when nothing matched.
pub(crate) async fn delete_by_id<E, C>(db: &C, id: i64) -> Result<(), RepoError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i64: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let result = E::delete_by_id(id).exec(db).await.map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}
