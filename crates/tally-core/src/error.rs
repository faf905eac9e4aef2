//! Error types for `tally-core`.

use thiserror::Error;

/// A request rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("itemId must be a non-empty string")]
  EmptyItemId,

  #[error("sessionId must be a non-empty string")]
  EmptySessionId,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error returned by [`FeedbackService`](crate::FeedbackService) operations,
/// generic over the backing store's error type.
///
/// Validation failures never reach the store; store failures carry the
/// backend's own error unchanged so callers can surface it distinctly.
#[derive(Debug, Error)]
pub enum ServiceError<E> {
  #[error(transparent)]
  Invalid(#[from] Error),

  #[error("store error: {0}")]
  Store(E),
}
