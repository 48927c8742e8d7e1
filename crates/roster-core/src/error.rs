//! Error types for `roster-core`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;
use uuid::Uuid;

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// Stable classification of every failure the roster can surface.
///
/// Transport layers map kinds onto their own status codes; the core never
/// does.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  IntoStaticStr,
  Serialize,
  Deserialize,
)]
pub enum ErrorKind {
  NotFound,
  AlreadyRetired,
  DuplicateAssignment,
  OverlapConflict,
  NameConflict,
  InvalidInput,
  ConcurrencyConflict,
  StoreFailure,
}

impl ErrorKind {
  /// Whether the same request may succeed if the caller simply retries it.
  pub fn is_retryable(self) -> bool { matches!(self, Self::ConcurrencyConflict) }
}

/// Implemented by every error type that crosses the store boundary, so that
/// callers generic over a backend can still tell a conflict from an outage.
pub trait AsErrorKind {
  fn error_kind(&self) -> ErrorKind;
}

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} does not exist")]
  PersonNotFound(String),

  #[error("{0} is retired")]
  AlreadyRetired(String),

  #[error("{name} already has duty {title} with rank {rank} for date {start_date}")]
  DuplicateAssignment {
    name:       String,
    rank:       String,
    title:      String,
    start_date: NaiveDate,
  },

  #[error(
    "duty starting {start_date} overlaps the existing duty starting {existing_start}"
  )]
  OverlapConflict {
    start_date:     NaiveDate,
    existing_start: NaiveDate,
  },

  #[error("{0} already exists")]
  NameConflict(String),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("timed out waiting for the duty lock on {0:?}")]
  LockTimeout(String),

  /// A close was requested for a record that is missing or already closed.
  #[error("duty record {0} is not open")]
  RecordNotOpen(Uuid),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::PersonNotFound(_) => ErrorKind::NotFound,
      Self::AlreadyRetired(_) => ErrorKind::AlreadyRetired,
      Self::DuplicateAssignment { .. } => ErrorKind::DuplicateAssignment,
      Self::OverlapConflict { .. } => ErrorKind::OverlapConflict,
      Self::NameConflict(_) => ErrorKind::NameConflict,
      Self::InvalidInput(_) => ErrorKind::InvalidInput,
      Self::LockTimeout(_) => ErrorKind::ConcurrencyConflict,
      Self::RecordNotOpen(_) => ErrorKind::StoreFailure,
    }
  }
}

impl AsErrorKind for Error {
  fn error_kind(&self) -> ErrorKind { self.kind() }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
