//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 `YYYY-MM-DD` strings so that lexical order in
//! SQL matches chronological order. UUIDs are stored as hyphenated lowercase
//! strings.

use chrono::NaiveDate;
use roster_core::{duty::DutyRecord, person::Person, status::StatusSnapshot};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String { date.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `people` row.
pub struct RawPerson {
  pub person_id: String,
  pub name:      String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id: row.get(0)?,
      name:      row.get(1)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id: decode_uuid(&self.person_id)?,
      name:      self.name,
    })
  }
}

/// Raw strings read directly from a `duties` row.
pub struct RawDutyRecord {
  pub record_id:  String,
  pub person_id:  String,
  pub rank:       String,
  pub title:      String,
  pub start_date: String,
  pub end_date:   Option<String>,
}

impl RawDutyRecord {
  /// Column order: `record_id, person_id, rank, title, start_date, end_date`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:  row.get(0)?,
      person_id:  row.get(1)?,
      rank:       row.get(2)?,
      title:      row.get(3)?,
      start_date: row.get(4)?,
      end_date:   row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<DutyRecord> {
    Ok(DutyRecord {
      record_id:  decode_uuid(&self.record_id)?,
      person_id:  decode_uuid(&self.person_id)?,
      rank:       self.rank,
      title:      self.title,
      start_date: decode_date(&self.start_date)?,
      end_date:   self.end_date.as_deref().map(decode_date).transpose()?,
    })
  }
}

/// Raw strings read directly from a `status_snapshots` row.
pub struct RawSnapshot {
  pub person_id:         String,
  pub current_rank:      String,
  pub current_title:     String,
  pub career_start_date: String,
  pub career_end_date:   Option<String>,
}

impl RawSnapshot {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:         row.get(0)?,
      current_rank:      row.get(1)?,
      current_title:     row.get(2)?,
      career_start_date: row.get(3)?,
      career_end_date:   row.get(4)?,
    })
  }

  pub fn into_snapshot(self) -> Result<StatusSnapshot> {
    Ok(StatusSnapshot {
      person_id:         decode_uuid(&self.person_id)?,
      current_rank:      self.current_rank,
      current_title:     self.current_title,
      career_start_date: decode_date(&self.career_start_date)?,
      career_end_date:   self
        .career_end_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
    })
  }
}
