//! [`SqliteStore`] — the SQLite implementation of [`FeedbackStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use tally_core::{
  store::FeedbackStore,
  vote::{FeedbackItem, VoteReceipt, VoteType, transition},
};

use crate::{
  Error, Result,
  encode::{RawItem, decode_vote_type, encode_dt, encode_vote_type},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A feedback ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Insert the zero-initialised aggregate row for `item_id` unless one
/// already exists. Runs inside the caller's connection (and transaction,
/// if any).
fn insert_item_if_absent(conn: &rusqlite::Connection, item_id: &str) -> rusqlite::Result<()> {
  let now = encode_dt(Utc::now());
  conn.execute(
    "INSERT INTO feedback_items (id, likes, dislikes, created_at, updated_at)
     VALUES (?1, 0, 0, ?2, ?2)
     ON CONFLICT (id) DO NOTHING",
    rusqlite::params![item_id, now],
  )?;
  Ok(())
}

fn select_item(conn: &rusqlite::Connection, item_id: &str) -> rusqlite::Result<RawItem> {
  conn.query_row(
    "SELECT id, likes, dislikes, created_at, updated_at
     FROM feedback_items WHERE id = ?1",
    rusqlite::params![item_id],
    |row| {
      Ok(RawItem {
        id:         row.get(0)?,
        likes:      row.get(1)?,
        dislikes:   row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
      })
    },
  )
}

fn select_vote(
  conn: &rusqlite::Connection,
  item_id: &str,
  session_id: &str,
) -> rusqlite::Result<Option<String>> {
  conn
    .query_row(
      "SELECT vote_type FROM user_votes WHERE item_id = ?1 AND session_id = ?2",
      rusqlite::params![item_id, session_id],
      |row| row.get(0),
    )
    .optional()
}

// ─── Test helpers ────────────────────────────────────────────────────────────

#[cfg(test)]
impl SqliteStore {
  /// Count the vote rows of one type for an item, for invariant checks.
  pub(crate) async fn vote_rows(&self, item_id: &str, vote: VoteType) -> i64 {
    let item_id = item_id.to_owned();
    let vote_str = encode_vote_type(vote).to_owned();
    self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM user_votes WHERE item_id = ?1 AND vote_type = ?2",
          rusqlite::params![item_id, vote_str],
          |row| row.get(0),
        )?)
      })
      .await
      .expect("count query")
  }

  /// Overwrite an item's counters directly, bypassing the state machine.
  /// Used to simulate data drift.
  pub(crate) async fn force_counters(&self, item_id: &str, likes: i64, dislikes: i64) {
    let item_id = item_id.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE feedback_items SET likes = ?1, dislikes = ?2 WHERE id = ?3",
          rusqlite::params![likes, dislikes, item_id],
        )?;
        Ok(())
      })
      .await
      .expect("force counters");
  }
}

// ─── FeedbackStore impl ──────────────────────────────────────────────────────

impl FeedbackStore for SqliteStore {
  type Error = Error;

  async fn ensure_item(&self, item_id: &str) -> Result<FeedbackItem> {
    let item_id = item_id.to_owned();

    let raw: RawItem = self
      .conn
      .call(move |conn| {
        insert_item_if_absent(conn, &item_id)?;
        Ok(select_item(conn, &item_id)?)
      })
      .await
      .map_err(Error::from_call_error)?;

    raw.into_item()
  }

  async fn get_vote(&self, item_id: &str, session_id: &str) -> Result<Option<VoteType>> {
    let item_id = item_id.to_owned();
    let session_id = session_id.to_owned();

    let vote_str: Option<String> = self
      .conn
      .call(move |conn| Ok(select_vote(conn, &item_id, &session_id)?))
      .await
      .map_err(Error::from_call_error)?;

    vote_str.as_deref().map(decode_vote_type).transpose()
  }

  async fn apply_vote(
    &self,
    item_id: &str,
    session_id: &str,
    requested: VoteType,
  ) -> Result<VoteReceipt> {
    let item_id = item_id.to_owned();
    let session_id = session_id.to_owned();

    self
      .conn
      .call(move |conn| {
        // IMMEDIATE takes the write lock up front, so the read below and the
        // writes that follow happen against a single consistent snapshot.
        // Dropping the transaction on any error path rolls everything back.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        insert_item_if_absent(&tx, &item_id)?;
        let item = select_item(&tx, &item_id)?;

        let current = select_vote(&tx, &item_id, &session_id)?
          .as_deref()
          .map(decode_vote_type)
          .transpose()
          .map_err(Error::into_call_error)?;

        let step = transition(current, requested);
        let likes = item.likes + step.likes_delta;
        let dislikes = item.dislikes + step.dislikes_delta;

        // Only reachable when the stored counters already disagree with the
        // vote rows. Fail and roll back instead of persisting a clamp.
        if likes < 0 || dislikes < 0 {
          return Err(
            Error::CounterUnderflow { item_id: item_id.clone() }.into_call_error(),
          );
        }

        let now = encode_dt(Utc::now());
        match step.next {
          None => {
            tx.execute(
              "DELETE FROM user_votes WHERE item_id = ?1 AND session_id = ?2",
              rusqlite::params![item_id, session_id],
            )?;
          }
          Some(vote) => {
            tx.execute(
              "INSERT INTO user_votes (item_id, session_id, vote_type, created_at)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT (item_id, session_id)
               DO UPDATE SET vote_type = excluded.vote_type",
              rusqlite::params![item_id, session_id, encode_vote_type(vote), now],
            )?;
          }
        }

        tx.execute(
          "UPDATE feedback_items
           SET likes = ?1, dislikes = ?2, updated_at = ?3
           WHERE id = ?4",
          rusqlite::params![likes, dislikes, now, item_id],
        )?;

        tx.commit()?;

        Ok(VoteReceipt { likes, dislikes, user_vote: step.next })
      })
      .await
      .map_err(Error::from_call_error)
  }
}
