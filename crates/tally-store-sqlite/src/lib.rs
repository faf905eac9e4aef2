//! SQLite backend for the tally feedback ledger.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Funnelling every statement through
//! that one connection worker also gives `apply_vote` its serialization
//! guarantee: two transactions can never interleave.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
