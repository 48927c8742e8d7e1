//! The duty assignment engine.
//!
//! Assignment is split in two phases. [`validate`] only reads and either
//! rejects the request or hands back a [`ValidatedAssignment`]; [`apply`]
//! performs the writes and assumes validation already passed. [`assign`]
//! composes the two. Callers run all of it inside one unit of work so that a
//! rejected request leaves the store untouched and an accepted one commits
//! close, insert and snapshot together.

use chrono::NaiveDate;

use crate::{
  Error,
  backend::{DutyTimelineStore, PersonDirectory, SnapshotStore, UnitOfWork},
  duty::{AssignDuty, DutyRecord, day_before, denotes_retirement},
  person::Person,
  policy::{AssignmentPolicy, OverlapPolicy},
  status,
};

/// Proof that an [`AssignDuty`] request passed [`validate`] against the
/// timeline as it stood at validation time.
#[derive(Debug, Clone)]
pub struct ValidatedAssignment {
  person:     Person,
  rank:       String,
  title:      String,
  start_date: NaiveDate,
  /// The day before `start_date`: end date for whatever record this
  /// assignment supersedes.
  close_on:   NaiveDate,
  /// Set when an existing record starts after `start_date`, which only the
  /// legacy policy lets through: the day before the earliest such start.
  fill_until: Option<NaiveDate>,
}

impl ValidatedAssignment {
  pub fn person(&self) -> &Person { &self.person }
}

/// Check `request` against the person's current state without writing.
///
/// Checks run in order: input shape, person exists, person not retired, no
/// identical (rank, title, start date) tuple, and, under
/// [`OverlapPolicy::Interval`], the start falls after every existing start.
pub fn validate<U>(
  uow: &U,
  policy: AssignmentPolicy,
  request: &AssignDuty,
) -> Result<ValidatedAssignment, U::Error>
where
  U: PersonDirectory + DutyTimelineStore + SnapshotStore,
{
  let rank = request.rank.trim();
  let title = request.title.trim();
  if rank.is_empty() {
    return Err(Error::InvalidInput("rank must not be blank".into()).into());
  }
  if title.is_empty() {
    return Err(Error::InvalidInput("title must not be blank".into()).into());
  }
  let close_on = day_before(request.start_date)?;

  let person = uow
    .resolve_by_name(&request.name)?
    .ok_or_else(|| Error::PersonNotFound(request.name.trim().to_owned()))?;

  if let Some(snapshot) = uow.snapshot(person.person_id)?
    && snapshot.is_retired()
  {
    return Err(Error::AlreadyRetired(person.name).into());
  }

  let timeline = uow.all_for_person(person.person_id)?;

  if timeline.iter().any(|r| r.matches(rank, title, request.start_date)) {
    return Err(
      Error::DuplicateAssignment {
        name:       person.name,
        rank:       rank.to_owned(),
        title:      title.to_owned(),
        start_date: request.start_date,
      }
      .into(),
    );
  }

  if policy.overlap == OverlapPolicy::Interval
    && let Some(existing_start) = timeline.iter().map(|r| r.start_date).max()
    && request.start_date <= existing_start
  {
    return Err(
      Error::OverlapConflict {
        start_date: request.start_date,
        existing_start,
      }
      .into(),
    );
  }

  let fill_until = timeline
    .iter()
    .map(|r| r.start_date)
    .filter(|start| *start > request.start_date)
    .min()
    .map(day_before)
    .transpose()?;

  Ok(ValidatedAssignment {
    person,
    rank: rank.to_owned(),
    title: title.to_owned(),
    start_date: request.start_date,
    close_on,
    fill_until,
  })
}

/// Write a validated assignment: close the superseded record, insert the new
/// one and refresh the snapshot.
///
/// A retirement entry is inserted already closed (end date the day before its
/// start), so a retired person has no open record. A backdated entry is
/// inserted closed at the day before the next later start and leaves the
/// records after it untouched.
pub fn apply<U>(
  uow: &mut U,
  assignment: ValidatedAssignment,
) -> Result<DutyRecord, U::Error>
where
  U: DutyTimelineStore + SnapshotStore,
{
  let ValidatedAssignment {
    person,
    rank,
    title,
    start_date,
    close_on,
    fill_until,
  } = assignment;
  let retiring = denotes_retirement(&title);

  let end_date = match fill_until {
    Some(_) if retiring => Some(close_on),
    Some(fill_until) => Some(fill_until),
    None => {
      if let Some(previous) = uow.latest_open_or_most_recent(person.person_id)?
        && previous.is_open()
      {
        uow.close_record(previous.record_id, close_on)?;
        tracing::debug!(
          record_id = %previous.record_id,
          end_date = %close_on,
          "closed superseded duty"
        );
      }
      retiring.then_some(close_on)
    }
  };

  let record = DutyRecord {
    record_id: uuid::Uuid::new_v4(),
    person_id: person.person_id,
    rank,
    title,
    start_date,
    end_date,
  };
  uow.append(&record)?;
  status::recompute(uow, person.person_id)?;

  tracing::info!(
    person = %person.name,
    record_id = %record.record_id,
    title = %record.title,
    start_date = %record.start_date,
    "duty assigned"
  );
  Ok(record)
}

/// Validate and apply in one go.
pub fn assign<U>(
  uow: &mut U,
  policy: AssignmentPolicy,
  request: &AssignDuty,
) -> Result<DutyRecord, U::Error>
where
  U: UnitOfWork,
{
  let validated = validate(&*uow, policy, request)?;
  apply(uow, validated)
}
