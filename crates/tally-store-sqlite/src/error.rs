//! Error type for `tally-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A counter update would have produced a negative value. The transaction
  /// is rolled back; persisted state no longer matches the vote rows and
  /// needs investigation.
  #[error("feedback counters for item {item_id:?} would drop below zero")]
  CounterUnderflow { item_id: String },

  #[error("unknown vote type in database: {0:?}")]
  UnknownVoteType(String),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Smuggle a store error out of a `tokio_rusqlite::Connection::call`
  /// closure, whose error type is fixed to `tokio_rusqlite::Error`.
  pub(crate) fn into_call_error(self) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Other(Box::new(self))
  }

  /// Recover a store error from a completed `call`, unwrapping errors that
  /// [`into_call_error`](Self::into_call_error) smuggled through.
  pub(crate) fn from_call_error(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Other(inner) => match inner.downcast::<Error>() {
        Ok(domain) => *domain,
        Err(inner) => Error::Database(tokio_rusqlite::Error::Other(inner)),
      },
      other => Error::Database(other),
    }
  }
}
