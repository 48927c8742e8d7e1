//! The `RosterStore` trait, the async surface callers program against.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`, `roster-server`) depend on this abstraction,
//! not on any concrete backend. Each method is one unit of work: it either
//! commits completely or leaves the store unchanged.

use std::future::Future;

use uuid::Uuid;

use crate::{
  AsErrorKind,
  duty::{AssignDuty, DutyHistory, DutyRecord},
  person::{Person, PersonStatus},
  status::StatusSnapshot,
};

/// Abstraction over a duty roster backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + AsErrorKind + Send + Sync + 'static;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Register a person. Names are unique ignoring case.
  fn create_person<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + 'a;

  /// Rename the person currently called `current`.
  fn rename_person<'a>(
    &'a self,
    current: &'a str,
    new_name: &'a str,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + 'a;

  /// Look a person up by name. Returns `None` if nobody has that name.
  fn get_person<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<PersonStatus>, Self::Error>> + Send + 'a;

  /// Every person with their current status, ordered by name.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<PersonStatus>, Self::Error>> + Send + '_;

  // ── Duties ────────────────────────────────────────────────────────────

  /// Assign a new duty, closing the one it supersedes and refreshing the
  /// person's status snapshot atomically.
  fn assign_duty<'a>(
    &'a self,
    request: &'a AssignDuty,
  ) -> impl Future<Output = Result<DutyRecord, Self::Error>> + Send + 'a;

  /// The person's status and full timeline. Returns `None` if nobody has
  /// that name.
  fn duty_history<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<DutyHistory>, Self::Error>> + Send + 'a;

  /// Rebuild the person's snapshot from their timeline. Returns `None` if the
  /// person has no duties yet.
  fn recompute_status(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Option<StatusSnapshot>, Self::Error>> + Send + '_;
}
