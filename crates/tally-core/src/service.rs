//! [`FeedbackService`] — validated entry point over a [`FeedbackStore`].
//!
//! The store handle is injected at construction. Input validation happens
//! here, before any storage access; everything past validation is delegated
//! to the backend, which owns transactional consistency.

use std::sync::Arc;

use crate::{
  error::{Error, ServiceError},
  store::FeedbackStore,
  vote::{ItemCounts, VoteReceipt, VoteType},
};

/// The feedback ledger service.
///
/// Cloning is cheap — the store handle is reference-counted.
pub struct FeedbackService<S> {
  store: Arc<S>,
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`.
impl<S> Clone for FeedbackService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: FeedbackStore> FeedbackService<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  /// Run the toggle state machine for `(item_id, session_id)` with the
  /// requested vote type, creating the item on first contact.
  ///
  /// Returns the post-transition counts plus the session's resulting vote.
  pub async fn cast_vote(
    &self,
    item_id: &str,
    session_id: &str,
    requested: VoteType,
  ) -> Result<VoteReceipt, ServiceError<S::Error>> {
    validate_item_id(item_id)?;
    validate_session_id(session_id)?;

    self
      .store
      .apply_vote(item_id, session_id, requested)
      .await
      .map_err(ServiceError::Store)
  }

  /// Current aggregate counts for `item_id`, creating the item record if it
  /// has never been seen.
  pub async fn get_counts(
    &self,
    item_id: &str,
  ) -> Result<ItemCounts, ServiceError<S::Error>> {
    validate_item_id(item_id)?;

    let item = self
      .store
      .ensure_item(item_id)
      .await
      .map_err(ServiceError::Store)?;

    Ok(ItemCounts { likes: item.likes, dislikes: item.dislikes })
  }

  /// The vote `session_id` currently holds on `item_id`, if any.
  pub async fn get_vote(
    &self,
    item_id: &str,
    session_id: &str,
  ) -> Result<Option<VoteType>, ServiceError<S::Error>> {
    validate_item_id(item_id)?;
    validate_session_id(session_id)?;

    self
      .store
      .get_vote(item_id, session_id)
      .await
      .map_err(ServiceError::Store)
  }
}

// Session ids are opaque client tokens; non-emptiness is the only format
// guarantee the ledger relies on.
fn validate_item_id(item_id: &str) -> Result<(), Error> {
  if item_id.trim().is_empty() {
    return Err(Error::EmptyItemId);
  }
  Ok(())
}

fn validate_session_id(session_id: &str) -> Result<(), Error> {
  if session_id.trim().is_empty() {
    return Err(Error::EmptySessionId);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vote::FeedbackItem;

  /// A store that panics on contact, proving validation short-circuits.
  struct UnreachableStore;

  impl FeedbackStore for UnreachableStore {
    type Error = std::convert::Infallible;

    async fn ensure_item(&self, _item_id: &str) -> Result<FeedbackItem, Self::Error> {
      unreachable!("validation must reject before storage access")
    }

    async fn get_vote(
      &self,
      _item_id: &str,
      _session_id: &str,
    ) -> Result<Option<VoteType>, Self::Error> {
      unreachable!("validation must reject before storage access")
    }

    async fn apply_vote(
      &self,
      _item_id: &str,
      _session_id: &str,
      _requested: VoteType,
    ) -> Result<VoteReceipt, Self::Error> {
      unreachable!("validation must reject before storage access")
    }
  }

  #[tokio::test]
  async fn empty_item_id_is_rejected_before_storage() {
    let svc = FeedbackService::new(Arc::new(UnreachableStore));
    let err = svc.get_counts("  ").await.unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(Error::EmptyItemId)));
  }

  #[tokio::test]
  async fn empty_session_id_is_rejected_before_storage() {
    let svc = FeedbackService::new(Arc::new(UnreachableStore));
    let err = svc.cast_vote("post-a", "", VoteType::Like).await.unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(Error::EmptySessionId)));
  }
}
