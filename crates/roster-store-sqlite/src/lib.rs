//! SQLite backend for the duty roster.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every [`RosterStore`] call runs as one
//! SQLite transaction on that thread; assignments additionally hold a
//! per-person lock while the transaction is in flight.
//!
//! [`RosterStore`]: roster_core::store::RosterStore

mod encode;
mod schema;
mod store;
mod unit_of_work;

pub mod error;

pub use error::{Error, Result};
pub use store::{SqliteStore, StoreOptions};
