//! Persons and the directory operations around them.
//!
//! Names are unique ignoring case. They are stored trimmed; lookups trim and
//! fold case the same way via [`name_key`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  backend::{PersonDirectory, SnapshotStore},
  status::StatusSnapshot,
};

/// A person who can hold duties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub person_id: Uuid,
  pub name:      String,
}

/// A person together with their current-status row, if they have one yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStatus {
  #[serde(flatten)]
  pub person: Person,
  pub status: Option<StatusSnapshot>,
}

/// The normalised form under which names are compared and indexed.
pub fn name_key(name: &str) -> String { name.trim().to_lowercase() }

fn clean_name(name: &str) -> Result<&str, Error> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(Error::InvalidInput("name must not be blank".into()));
  }
  Ok(trimmed)
}

/// Register a new person. Fails with [`Error::NameConflict`] if the name is
/// already taken.
pub fn create_person<D>(dir: &mut D, name: &str) -> Result<Person, D::Error>
where
  D: PersonDirectory,
{
  let name = clean_name(name)?;
  if dir.resolve_by_name(name)?.is_some() {
    return Err(Error::NameConflict(name.to_owned()).into());
  }

  let person = Person {
    person_id: Uuid::new_v4(),
    name:      name.to_owned(),
  };
  dir.insert_person(&person)?;
  tracing::debug!(person_id = %person.person_id, name = %person.name, "person created");
  Ok(person)
}

/// Rename `current` to `new_name`.
///
/// A person may change the case of their own name; taking a name that belongs
/// to somebody else fails with [`Error::NameConflict`].
pub fn rename_person<D>(
  dir: &mut D,
  current: &str,
  new_name: &str,
) -> Result<Person, D::Error>
where
  D: PersonDirectory,
{
  let new_name = clean_name(new_name)?;
  let mut person = dir
    .resolve_by_name(current)?
    .ok_or_else(|| Error::PersonNotFound(current.trim().to_owned()))?;

  if let Some(holder) = dir.resolve_by_name(new_name)?
    && holder.person_id != person.person_id
  {
    return Err(Error::NameConflict(new_name.to_owned()).into());
  }

  dir.rename_person(person.person_id, new_name)?;
  tracing::debug!(person_id = %person.person_id, from = %person.name, to = %new_name, "person renamed");
  person.name = new_name.to_owned();
  Ok(person)
}

/// Resolve `name` and attach the person's snapshot.
pub fn person_status<U>(
  uow: &U,
  name: &str,
) -> Result<Option<PersonStatus>, U::Error>
where
  U: PersonDirectory + SnapshotStore,
{
  let Some(person) = uow.resolve_by_name(name)? else {
    return Ok(None);
  };
  let status = uow.snapshot(person.person_id)?;
  Ok(Some(PersonStatus { person, status }))
}

/// Every person with their snapshot, ordered by name.
pub fn list_people<U>(uow: &U) -> Result<Vec<PersonStatus>, U::Error>
where
  U: PersonDirectory + SnapshotStore,
{
  uow
    .list_people()?
    .into_iter()
    .map(|person| {
      let status = uow.snapshot(person.person_id)?;
      Ok(PersonStatus { person, status })
    })
    .collect()
}
