//! Per-person mutual exclusion for assignment units of work.
//!
//! Two assignments for the same person must not both observe the same open
//! record. Backends resolve the person, take a [`PersonGuard`] before opening
//! their transaction and hold it until the transaction has committed or rolled
//! back. Persons never contend with each other.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, PoisonError},
  time::Duration,
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{Error, Result, person::Person};

/// Held for the duration of one unit of work; releases on drop.
#[derive(Debug)]
pub struct PersonGuard {
  _guard: OwnedMutexGuard<()>,
}

/// A lazily populated table of per-person async mutexes.
///
/// Locks are keyed by `person_id`, so a rename between two assignments does
/// not split them across different locks.
#[derive(Debug, Clone)]
pub struct PersonLocks {
  slots:   Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
  timeout: Duration,
}

impl Default for PersonLocks {
  fn default() -> Self { Self::new(Self::DEFAULT_TIMEOUT) }
}

impl PersonLocks {
  pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

  pub fn new(timeout: Duration) -> Self {
    Self {
      slots: Arc::new(Mutex::new(HashMap::new())),
      timeout,
    }
  }

  pub fn timeout(&self) -> Duration { self.timeout }

  /// Wait up to the configured timeout for exclusive access to `person`.
  ///
  /// Fails with [`Error::LockTimeout`], a retryable concurrency conflict, if
  /// another unit of work holds the lock for longer than that.
  pub async fn acquire(&self, person: &Person) -> Result<PersonGuard> {
    let slot = {
      let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
      // A slot only the table references is neither held nor awaited.
      slots.retain(|_, slot| Arc::strong_count(slot) > 1);
      slots.entry(person.person_id).or_default().clone()
    };

    match tokio::time::timeout(self.timeout, slot.lock_owned()).await {
      Ok(guard) => Ok(PersonGuard { _guard: guard }),
      Err(_) => {
        tracing::warn!(
          person = %person.name,
          person_id = %person.person_id,
          timeout = ?self.timeout,
          "duty lock wait timed out"
        );
        Err(Error::LockTimeout(person.name.clone()))
      }
    }
  }
}
