//! Classification of SeaORM errors into repository errors.

use sea_orm::{DbErr, SqlErr};

use quill_core::error::RepoError;

/// Unique and foreign-key violations become `Constraint` with the server's
/// message; an update or lookup that matched no row becomes `NotFound`.
pub(crate) fn repo_error(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            return RepoError::Constraint(msg);
        }
        _ => {}
    }

    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}
