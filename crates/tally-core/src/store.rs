//! The `FeedbackStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tally-store-sqlite`).
//! Higher layers (`tally-api`, the service) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::vote::{FeedbackItem, VoteReceipt, VoteType};

/// Abstraction over a feedback ledger backend.
///
/// The store exclusively owns the item and vote records. `apply_vote` is the
/// single mutating operation and must be atomic: either all of (read current
/// vote, delta the vote row, update aggregates) commit, or none do.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FeedbackStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the aggregate row for `item_id`, inserting a zero-initialised
  /// one if the item has never been seen. Idempotent.
  fn ensure_item<'a>(
    &'a self,
    item_id: &'a str,
  ) -> impl Future<Output = Result<FeedbackItem, Self::Error>> + Send + 'a;

  /// Point lookup of the vote `session_id` currently holds on `item_id`.
  fn get_vote<'a>(
    &'a self,
    item_id: &'a str,
    session_id: &'a str,
  ) -> impl Future<Output = Result<Option<VoteType>, Self::Error>> + Send + 'a;

  /// Apply one requested vote through the toggle state machine
  /// ([`transition`](crate::vote::transition)) in a single transaction,
  /// creating the item row if needed.
  ///
  /// Returns the post-transition aggregates and the session's resulting
  /// vote. Concurrent calls for the same `(item_id, session_id)` must
  /// serialize so each one observes a consistent prior state.
  fn apply_vote<'a>(
    &'a self,
    item_id: &'a str,
    session_id: &'a str,
    requested: VoteType,
  ) -> impl Future<Output = Result<VoteReceipt, Self::Error>> + Send + 'a;
}
