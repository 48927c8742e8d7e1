//! Error type for `roster-store-sqlite`.

use roster_core::{AsErrorKind, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Core(#[from] roster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// SQLite reports write-lock contention as `SQLITE_BUSY` or `SQLITE_LOCKED`
/// once `busy_timeout` has elapsed.
fn is_contention(err: &rusqlite::Error) -> bool {
  matches!(
    err.sqlite_error_code(),
    Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
  )
}

impl AsErrorKind for Error {
  fn error_kind(&self) -> ErrorKind {
    match self {
      Error::Core(e) => e.kind(),
      Error::Sqlite(e) if is_contention(e) => ErrorKind::ConcurrencyConflict,
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) if is_contention(e) => {
        ErrorKind::ConcurrencyConflict
      }
      _ => ErrorKind::StoreFailure,
    }
  }
}
