//! Duty records: the append-mostly timeline of a person's assignments.
//!
//! A record is written once when the assignment is made. The only later write
//! is the single transition of `end_date` from `None` to a concrete date when a
//! newer assignment supersedes it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, person::PersonStatus};

/// The title that marks a person as no longer active.
pub const RETIRED_TITLE: &str = "RETIRED";

/// Whether `title` is the retirement marker. Surrounding whitespace and ASCII
/// case are ignored.
pub fn denotes_retirement(title: &str) -> bool {
  title.trim().eq_ignore_ascii_case(RETIRED_TITLE)
}

/// The calendar day before `date`; used both to close a superseded record and
/// to end a career on retirement.
pub fn day_before(date: NaiveDate) -> Result<NaiveDate> {
  date
    .pred_opt()
    .ok_or_else(|| Error::InvalidInput(format!("{date} has no preceding day")))
}

// ─── DutyRecord ──────────────────────────────────────────────────────────────

/// One assignment in a person's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRecord {
  pub record_id:  Uuid,
  pub person_id:  Uuid,
  pub rank:       String,
  pub title:      String,
  pub start_date: NaiveDate,
  /// `None` while the assignment is in effect. A retirement entry is written
  /// with `start_date - 1 day` here and is therefore never open.
  pub end_date:   Option<NaiveDate>,
}

impl DutyRecord {
  pub fn is_open(&self) -> bool { self.end_date.is_none() }

  pub fn is_retirement(&self) -> bool { denotes_retirement(&self.title) }

  /// Whether this record is the exact (rank, title, start date) tuple.
  pub fn matches(&self, rank: &str, title: &str, start_date: NaiveDate) -> bool {
    self.start_date == start_date && self.rank == rank && self.title == title
  }
}

// ─── Requests and views ──────────────────────────────────────────────────────

/// Input to [`crate::store::RosterStore::assign_duty`]: assign `name` to
/// `title` at `rank` from `start_date` onwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignDuty {
  pub name:       String,
  pub rank:       String,
  pub title:      String,
  pub start_date: NaiveDate,
}

/// A person, their current status, and every duty they have held in ascending
/// start-date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyHistory {
  pub person: PersonStatus,
  pub duties: Vec<DutyRecord>,
}
