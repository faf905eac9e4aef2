//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Vote types are stored as
//! the lowercase strings the schema's CHECK constraint enumerates.

use chrono::{DateTime, Utc};
use tally_core::vote::{FeedbackItem, VoteType};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── VoteType ────────────────────────────────────────────────────────────────

pub fn encode_vote_type(v: VoteType) -> &'static str {
  v.as_str()
}

pub fn decode_vote_type(s: &str) -> Result<VoteType> {
  match s {
    "like" => Ok(VoteType::Like),
    "dislike" => Ok(VoteType::Dislike),
    other => Err(Error::UnknownVoteType(other.to_owned())),
  }
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `feedback_items` row as read from SQLite, before column decoding.
pub struct RawItem {
  pub id:         String,
  pub likes:      i64,
  pub dislikes:   i64,
  pub created_at: String,
  pub updated_at: String,
}

impl RawItem {
  pub fn into_item(self) -> Result<FeedbackItem> {
    Ok(FeedbackItem {
      id:         self.id,
      likes:      self.likes,
      dislikes:   self.dislikes,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
