//! Collaborator traits consumed by the engine and the projector.
//!
//! These are synchronous on purpose: an implementation is a handle onto one
//! open unit of work (for SQLite, a `Transaction`), and everything the engine
//! does through it commits or rolls back together. The async surface callers
//! see lives in [`crate::store`].

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Error, duty::DutyRecord, person::Person, status::StatusSnapshot,
};

/// Shared error plumbing for the collaborator traits.
///
/// Every backend error must be constructible from a core [`Error`] so that
/// validation failures flow out through the same channel as I/O failures.
pub trait Backend {
  type Error: From<Error>;
}

/// Resolves and maintains the set of known persons.
pub trait PersonDirectory: Backend {
  /// Case-insensitive exact match on the trimmed name.
  fn resolve_by_name(&self, name: &str) -> Result<Option<Person>, Self::Error>;

  fn insert_person(&mut self, person: &Person) -> Result<(), Self::Error>;

  fn rename_person(
    &mut self,
    person_id: Uuid,
    name: &str,
  ) -> Result<(), Self::Error>;

  /// All persons, ordered by name.
  fn list_people(&self) -> Result<Vec<Person>, Self::Error>;
}

/// Ordered persistence of duty records.
pub trait DutyTimelineStore: Backend {
  /// Persist a new record. Fails on a uniqueness or constraint violation.
  fn append(&mut self, record: &DutyRecord) -> Result<Uuid, Self::Error>;

  /// The person's open record if there is one, otherwise the record with the
  /// latest start date.
  fn latest_open_or_most_recent(
    &self,
    person_id: Uuid,
  ) -> Result<Option<DutyRecord>, Self::Error>;

  /// Every record for the person, ascending by start date; ties keep
  /// insertion order.
  fn all_for_person(
    &self,
    person_id: Uuid,
  ) -> Result<Vec<DutyRecord>, Self::Error>;

  /// Set `end_date` on an open record. Fails with
  /// [`Error::RecordNotOpen`] if the record is missing or already closed.
  fn close_record(
    &mut self,
    record_id: Uuid,
    end_date: NaiveDate,
  ) -> Result<(), Self::Error>;
}

/// Storage for the denormalised current-status row.
pub trait SnapshotStore: Backend {
  fn snapshot(
    &self,
    person_id: Uuid,
  ) -> Result<Option<StatusSnapshot>, Self::Error>;

  /// Insert the row if absent, otherwise overwrite it completely.
  fn upsert(&mut self, snapshot: &StatusSnapshot) -> Result<(), Self::Error>;
}

/// Everything one assignment touches.
pub trait UnitOfWork: PersonDirectory + DutyTimelineStore + SnapshotStore {}

impl<T> UnitOfWork for T where T: PersonDirectory + DutyTimelineStore + SnapshotStore
{}
