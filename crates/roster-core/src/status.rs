//! The current-status snapshot and the projector that derives it.
//!
//! The snapshot is a denormalised cache of the timeline: it is always
//! recomputed from the full list of records, never patched incrementally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  backend::{DutyTimelineStore, SnapshotStore},
  duty::{DutyRecord, day_before, denotes_retirement},
};

/// One row per person, mirroring the record with the latest start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
  pub person_id:         Uuid,
  pub current_rank:      String,
  pub current_title:     String,
  pub career_start_date: NaiveDate,
  /// Set only when the current title denotes retirement.
  pub career_end_date:   Option<NaiveDate>,
}

impl StatusSnapshot {
  pub fn is_retired(&self) -> bool { denotes_retirement(&self.current_title) }
}

/// Derive the snapshot for `person_id` from its timeline.
///
/// Returns `None` for an empty timeline. The current record is the one with
/// the latest start date; on a tie the record written last wins.
pub fn project(person_id: Uuid, timeline: &[DutyRecord]) -> Option<StatusSnapshot> {
  // `max_by_key` yields the last of several equal maxima.
  let current = timeline.iter().max_by_key(|r| r.start_date)?;
  let career_start_date = timeline.iter().map(|r| r.start_date).min()?;

  let career_end_date = if current.is_retirement() {
    // `pred_opt` only fails on `NaiveDate::MIN`, which validation rejects.
    day_before(current.start_date).ok()
  } else {
    None
  };

  Some(StatusSnapshot {
    person_id,
    current_rank: current.rank.clone(),
    current_title: current.title.clone(),
    career_start_date,
    career_end_date,
  })
}

/// Re-read the person's timeline and overwrite their snapshot.
///
/// Idempotent: with no intervening timeline change, repeated calls write the
/// same content. A person without records gets no snapshot.
pub fn recompute<U>(
  uow: &mut U,
  person_id: Uuid,
) -> Result<Option<StatusSnapshot>, U::Error>
where
  U: DutyTimelineStore + SnapshotStore,
{
  let timeline = uow.all_for_person(person_id)?;
  let Some(snapshot) = project(person_id, &timeline) else {
    return Ok(None);
  };
  uow.upsert(&snapshot)?;
  tracing::debug!(
    %person_id,
    rank = %snapshot.current_rank,
    title = %snapshot.current_title,
    "status recomputed"
  );
  Ok(Some(snapshot))
}
