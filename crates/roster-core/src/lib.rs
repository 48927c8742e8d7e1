//! Core types and trait definitions for the duty roster.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the assignment rules and the status projection; storage backends plug in by
//! implementing the collaborator traits in [`backend`] and the async service
//! trait in [`store`].

// Native `async fn` in traits; the `Send` bounds are spelled out on the
// returned futures where they matter.
#![allow(async_fn_in_trait)]

pub mod backend;
pub mod duty;
pub mod engine;
pub mod error;
pub mod lock;
pub mod person;
pub mod policy;
pub mod status;
pub mod store;

pub use error::{AsErrorKind, Error, ErrorKind, Result};
