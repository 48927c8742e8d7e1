//! [`SqliteStore`]: the SQLite implementation of [`RosterStore`].

use std::{path::Path, time::Duration};

use rusqlite::TransactionBehavior;
use uuid::Uuid;

use roster_core::{
  backend::{DutyTimelineStore as _, PersonDirectory as _},
  duty::{AssignDuty, DutyHistory, DutyRecord},
  engine,
  lock::PersonLocks,
  person::{self, Person, PersonStatus},
  policy::AssignmentPolicy,
  status::{self, StatusSnapshot},
  store::RosterStore,
};

use crate::{Result, schema::SCHEMA, unit_of_work::SqliteUnitOfWork};

// ─── Options ─────────────────────────────────────────────────────────────────

/// Knobs for [`SqliteStore::open_with`].
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
  pub policy:       AssignmentPolicy,
  /// Longest an assignment waits for another assignment to the same person.
  pub lock_timeout: Duration,
  /// Longest SQLite waits for a write lock held by another connection.
  pub busy_timeout: Duration,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      policy:       AssignmentPolicy::default(),
      lock_timeout: PersonLocks::DEFAULT_TIMEOUT,
      busy_timeout: Duration::from_secs(5),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A duty roster backed by a single SQLite file.
///
/// Cloning is cheap; the connection and the lock table are
/// reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  locks:  PersonLocks,
  policy: AssignmentPolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with default options.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, StoreOptions::default()).await
  }

  pub async fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self::from_connection(conn, options).await?;
    tracing::info!(path = %path.display(), policy = %options.policy.overlap, "opened duty store");
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    Self::open_in_memory_with(StoreOptions::default()).await
  }

  pub async fn open_in_memory_with(options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::from_connection(conn, options).await
  }

  async fn from_connection(
    conn: tokio_rusqlite::Connection,
    options: StoreOptions,
  ) -> Result<Self> {
    let busy_timeout = options.busy_timeout;
    conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;

    Ok(Self {
      conn,
      locks: PersonLocks::new(options.lock_timeout),
      policy: options.policy,
    })
  }

  pub fn policy(&self) -> AssignmentPolicy { self.policy }

  /// Run `f` inside one transaction on the connection thread.
  ///
  /// Commits only if `f` succeeds; on any error the transaction is dropped and
  /// rolled back, so nothing `f` wrote is visible. The closure runs to
  /// completion even if the awaiting future is dropped, which means a
  /// cancelled caller sees either the whole unit of work or none of it.
  async fn transact<T, F>(&self, behavior: TransactionBehavior, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqliteUnitOfWork<'_>) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let outcome = run_in_transaction(conn, behavior, f);
        if let Err(e) = &outcome {
          tracing::debug!(error = %e, "unit of work rolled back");
        }
        Ok(outcome)
      })
      .await?
  }

  /// A write transaction takes SQLite's write lock up front, so the reads it
  /// validates against cannot go stale before its writes land.
  pub(crate) async fn write<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqliteUnitOfWork<'_>) -> Result<T> + Send + 'static,
  {
    self.transact(TransactionBehavior::Immediate, f).await
  }

  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqliteUnitOfWork<'_>) -> Result<T> + Send + 'static,
  {
    self.transact(TransactionBehavior::Deferred, f).await
  }
}

fn run_in_transaction<T>(
  conn: &mut rusqlite::Connection,
  behavior: TransactionBehavior,
  f: impl FnOnce(&mut SqliteUnitOfWork<'_>) -> Result<T>,
) -> Result<T> {
  let tx = conn.transaction_with_behavior(behavior)?;
  let value = f(&mut SqliteUnitOfWork::new(&tx))?;
  tx.commit()?;
  Ok(value)
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn create_person(&self, name: &str) -> Result<Person> {
    let name = name.to_owned();
    self.write(move |uow| person::create_person(uow, &name)).await
  }

  async fn rename_person(&self, current: &str, new_name: &str) -> Result<Person> {
    let current = current.to_owned();
    let new_name = new_name.to_owned();
    self
      .write(move |uow| person::rename_person(uow, &current, &new_name))
      .await
  }

  async fn get_person(&self, name: &str) -> Result<Option<PersonStatus>> {
    let name = name.to_owned();
    self.read(move |uow| person::person_status(&*uow, &name)).await
  }

  async fn list_people(&self) -> Result<Vec<PersonStatus>> {
    self.read(|uow| person::list_people(&*uow)).await
  }

  // ── Duties ────────────────────────────────────────────────────────────────

  async fn assign_duty(&self, request: &AssignDuty) -> Result<DutyRecord> {
    let name = request.name.clone();
    let person = self
      .read(move |uow| uow.resolve_by_name(&name))
      .await?;
    // An unknown person has nothing to serialise; validation reports it.
    let _guard = match &person {
      Some(person) => Some(self.locks.acquire(person).await?),
      None => None,
    };
    let request = request.clone();
    let policy = self.policy;
    self
      .write(move |uow| engine::assign(uow, policy, &request))
      .await
  }

  async fn duty_history(&self, name: &str) -> Result<Option<DutyHistory>> {
    let name = name.to_owned();
    self
      .read(move |uow| {
        let Some(person) = person::person_status(&*uow, &name)? else {
          return Ok(None);
        };
        let duties = uow.all_for_person(person.person.person_id)?;
        Ok(Some(DutyHistory { person, duties }))
      })
      .await
  }

  async fn recompute_status(&self, person_id: Uuid) -> Result<Option<StatusSnapshot>> {
    self.write(move |uow| status::recompute(uow, person_id)).await
  }
}
