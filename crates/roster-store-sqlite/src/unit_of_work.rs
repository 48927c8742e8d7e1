//! [`SqliteUnitOfWork`]: the collaborator traits over one open transaction.
//!
//! Constructed only inside [`crate::SqliteStore`]'s transaction helpers, so
//! every statement issued here belongs to the surrounding transaction. All
//! statements are parameterised; user input never reaches SQL text.

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  backend::{Backend, DutyTimelineStore, PersonDirectory, SnapshotStore},
  duty::DutyRecord,
  person::{Person, name_key},
  status::StatusSnapshot,
};

use crate::{
  Error, Result,
  encode::{RawDutyRecord, RawPerson, RawSnapshot, encode_date, encode_uuid},
};

const DUTY_COLUMNS: &str =
  "record_id, person_id, rank, title, start_date, end_date";

pub struct SqliteUnitOfWork<'a> {
  conn: &'a rusqlite::Connection,
}

impl<'a> SqliteUnitOfWork<'a> {
  /// `conn` must be a [`rusqlite::Transaction`] (via deref) for the
  /// unit-of-work guarantees to hold.
  pub fn new(conn: &'a rusqlite::Connection) -> Self { Self { conn } }
}

impl Backend for SqliteUnitOfWork<'_> {
  type Error = Error;
}

// ─── PersonDirectory ─────────────────────────────────────────────────────────

impl PersonDirectory for SqliteUnitOfWork<'_> {
  fn resolve_by_name(&self, name: &str) -> Result<Option<Person>> {
    let raw = self
      .conn
      .prepare_cached("SELECT person_id, name FROM people WHERE name_key = ?1")?
      .query_row(rusqlite::params![name_key(name)], RawPerson::from_row)
      .optional()?;
    raw.map(RawPerson::into_person).transpose()
  }

  fn insert_person(&mut self, person: &Person) -> Result<()> {
    self.conn.execute(
      "INSERT INTO people (person_id, name, name_key) VALUES (?1, ?2, ?3)",
      rusqlite::params![
        encode_uuid(person.person_id),
        person.name,
        name_key(&person.name),
      ],
    )?;
    Ok(())
  }

  fn rename_person(&mut self, person_id: Uuid, name: &str) -> Result<()> {
    self.conn.execute(
      "UPDATE people SET name = ?2, name_key = ?3 WHERE person_id = ?1",
      rusqlite::params![encode_uuid(person_id), name, name_key(name)],
    )?;
    Ok(())
  }

  fn list_people(&self) -> Result<Vec<Person>> {
    let mut stmt = self
      .conn
      .prepare("SELECT person_id, name FROM people ORDER BY name_key, name")?;
    let raws = stmt
      .query_map([], RawPerson::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawPerson::into_person).collect()
  }
}

// ─── DutyTimelineStore ───────────────────────────────────────────────────────

impl DutyTimelineStore for SqliteUnitOfWork<'_> {
  fn append(&mut self, record: &DutyRecord) -> Result<Uuid> {
    self.conn.execute(
      "INSERT INTO duties (record_id, person_id, rank, title, start_date, end_date)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      rusqlite::params![
        encode_uuid(record.record_id),
        encode_uuid(record.person_id),
        record.rank,
        record.title,
        encode_date(record.start_date),
        record.end_date.map(encode_date),
      ],
    )?;
    Ok(record.record_id)
  }

  fn latest_open_or_most_recent(&self, person_id: Uuid) -> Result<Option<DutyRecord>> {
    let raw = self
      .conn
      .prepare_cached(&format!(
        "SELECT {DUTY_COLUMNS} FROM duties
         WHERE person_id = ?1
         ORDER BY end_date IS NULL DESC, start_date DESC, rowid DESC
         LIMIT 1"
      ))?
      .query_row(rusqlite::params![encode_uuid(person_id)], RawDutyRecord::from_row)
      .optional()?;
    raw.map(RawDutyRecord::into_record).transpose()
  }

  fn all_for_person(&self, person_id: Uuid) -> Result<Vec<DutyRecord>> {
    let mut stmt = self.conn.prepare_cached(&format!(
      "SELECT {DUTY_COLUMNS} FROM duties
       WHERE person_id = ?1
       ORDER BY start_date ASC, rowid ASC"
    ))?;
    let raws = stmt
      .query_map(rusqlite::params![encode_uuid(person_id)], RawDutyRecord::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawDutyRecord::into_record).collect()
  }

  fn close_record(&mut self, record_id: Uuid, end_date: NaiveDate) -> Result<()> {
    let changed = self.conn.execute(
      "UPDATE duties SET end_date = ?2 WHERE record_id = ?1 AND end_date IS NULL",
      rusqlite::params![encode_uuid(record_id), encode_date(end_date)],
    )?;
    if changed == 0 {
      return Err(roster_core::Error::RecordNotOpen(record_id).into());
    }
    Ok(())
  }
}

// ─── SnapshotStore ───────────────────────────────────────────────────────────

impl SnapshotStore for SqliteUnitOfWork<'_> {
  fn snapshot(&self, person_id: Uuid) -> Result<Option<StatusSnapshot>> {
    let raw = self
      .conn
      .prepare_cached(
        "SELECT person_id, current_rank, current_title,
                career_start_date, career_end_date
         FROM status_snapshots WHERE person_id = ?1",
      )?
      .query_row(rusqlite::params![encode_uuid(person_id)], RawSnapshot::from_row)
      .optional()?;
    raw.map(RawSnapshot::into_snapshot).transpose()
  }

  fn upsert(&mut self, snapshot: &StatusSnapshot) -> Result<()> {
    self.conn.execute(
      "INSERT INTO status_snapshots (
         person_id, current_rank, current_title,
         career_start_date, career_end_date
       ) VALUES (?1, ?2, ?3, ?4, ?5)
       ON CONFLICT (person_id) DO UPDATE SET
         current_rank      = excluded.current_rank,
         current_title     = excluded.current_title,
         career_start_date = excluded.career_start_date,
         career_end_date   = excluded.career_end_date",
      rusqlite::params![
        encode_uuid(snapshot.person_id),
        snapshot.current_rank,
        snapshot.current_title,
        encode_date(snapshot.career_start_date),
        snapshot.career_end_date.map(encode_date),
      ],
    )?;
    Ok(())
  }
}
