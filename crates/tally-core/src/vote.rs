//! Vote domain types and the toggle transition function.
//!
//! A session holds at most one vote per item. Requesting the vote type it
//! already holds retracts it; requesting the opposite type switches it;
//! requesting from no-vote casts a new one. Aggregate counters move in
//! lock-step with the vote rows, so `likes`/`dislikes` always equal the
//! number of sessions currently holding that vote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Vote type ───────────────────────────────────────────────────────────────

/// The two kinds of vote a session can hold on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
  Like,
  Dislike,
}

impl VoteType {
  pub fn as_str(self) -> &'static str {
    match self {
      VoteType::Like => "like",
      VoteType::Dislike => "dislike",
    }
  }
}

// ─── Persisted records ───────────────────────────────────────────────────────

/// Aggregate feedback counters for one item.
///
/// Created lazily on first read or first vote; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
  pub id:         String,
  pub likes:      i64,
  pub dislikes:   i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── Read / write results ────────────────────────────────────────────────────

/// Aggregate counts returned by a counts read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounts {
  pub likes:    i64,
  pub dislikes: i64,
}

/// The post-transition state returned by a vote write: the item's new
/// aggregates plus the calling session's resulting vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
  pub likes:     i64,
  pub dislikes:  i64,
  pub user_vote: Option<VoteType>,
}

// ─── Transition function ─────────────────────────────────────────────────────

/// The outcome of applying one requested vote to a session's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
  /// The session's vote after the request. `None` means toggled off.
  pub next:           Option<VoteType>,
  pub likes_delta:    i64,
  pub dislikes_delta: i64,
}

/// Compute the next vote state and counter deltas for a session currently
/// holding `current` and requesting `requested`.
///
/// Exactly six transitions are reachable: cast from no-vote, toggle off the
/// held type, or switch to the opposite type, for each of the two types.
pub fn transition(current: Option<VoteType>, requested: VoteType) -> Transition {
  let mut likes_delta = 0;
  let mut dislikes_delta = 0;

  // Release the currently held vote, if any.
  match current {
    Some(VoteType::Like) => likes_delta -= 1,
    Some(VoteType::Dislike) => dislikes_delta -= 1,
    None => {}
  }

  // Re-requesting the held type means retraction; anything else casts.
  let next = if current == Some(requested) {
    None
  } else {
    match requested {
      VoteType::Like => likes_delta += 1,
      VoteType::Dislike => dislikes_delta += 1,
    }
    Some(requested)
  };

  Transition { next, likes_delta, dislikes_delta }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use VoteType::{Dislike, Like};

  fn t(next: Option<VoteType>, likes: i64, dislikes: i64) -> Transition {
    Transition { next, likes_delta: likes, dislikes_delta: dislikes }
  }

  #[test]
  fn full_transition_table() {
    assert_eq!(transition(None, Like), t(Some(Like), 1, 0));
    assert_eq!(transition(None, Dislike), t(Some(Dislike), 0, 1));
    assert_eq!(transition(Some(Like), Like), t(None, -1, 0));
    assert_eq!(transition(Some(Like), Dislike), t(Some(Dislike), -1, 1));
    assert_eq!(transition(Some(Dislike), Dislike), t(None, 0, -1));
    assert_eq!(transition(Some(Dislike), Like), t(Some(Like), 1, -1));
  }

  #[test]
  fn double_cast_is_a_no_op_on_counters() {
    // NoVote -> Liked -> NoVote: the deltas cancel.
    let first  = transition(None, Like);
    let second = transition(first.next, Like);
    assert_eq!(second.next, None);
    assert_eq!(first.likes_delta + second.likes_delta, 0);
    assert_eq!(first.dislikes_delta + second.dislikes_delta, 0);
  }

  #[test]
  fn switch_moves_one_count_between_counters() {
    let switched = transition(Some(Like), Dislike);
    assert_eq!(switched.likes_delta + switched.dislikes_delta, 0);
    assert_eq!(switched.next, Some(Dislike));
  }

  #[test]
  fn vote_type_wire_names_are_lowercase() {
    assert_eq!(serde_json::to_string(&Like).unwrap(), r#""like""#);
    assert_eq!(
      serde_json::from_str::<VoteType>(r#""dislike""#).unwrap(),
      Dislike
    );
    assert!(serde_json::from_str::<VoteType>(r#""meh""#).is_err());
  }
}
