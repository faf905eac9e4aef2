//! Handlers for the `/feedback` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/feedback` | `?itemId` required; returns aggregate counts |
//! | `POST` | `/feedback` | Body: [`VoteBody`]; runs the toggle state machine |
//! | `GET`  | `/feedback/user` | `?itemId&sessionId`; the session's current vote |
//!
//! Wire field names are camelCase, matching the feedback widget that calls
//! this API.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tally_core::{
  FeedbackService, FeedbackStore,
  vote::{ItemCounts, VoteReceipt, VoteType},
};

use crate::error::ApiError;

// ─── Counts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsParams {
  pub item_id: String,
}

/// `GET /feedback?itemId=<id>`
pub async fn counts<S>(
  State(service): State<FeedbackService<S>>,
  Query(params): Query<CountsParams>,
) -> Result<Json<ItemCounts>, ApiError>
where
  S: FeedbackStore,
{
  let counts = service.get_counts(&params.item_id).await?;
  Ok(Json(counts))
}

// ─── Cast vote ───────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /feedback`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteBody {
  pub item_id:    String,
  pub session_id: String,
  pub vote_type:  VoteType,
}

/// `POST /feedback` — returns the post-transition counts plus the caller's
/// resulting vote (`null` after a toggle-off).
pub async fn vote<S>(
  State(service): State<FeedbackService<S>>,
  Json(body): Json<VoteBody>,
) -> Result<Json<VoteReceipt>, ApiError>
where
  S: FeedbackStore,
{
  let receipt = service
    .cast_vote(&body.item_id, &body.session_id, body.vote_type)
    .await?;
  Ok(Json(receipt))
}

// ─── Session vote lookup ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVoteParams {
  pub item_id:    String,
  pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct UserVoteResponse {
  pub vote: Option<VoteType>,
}

/// `GET /feedback/user?itemId=<id>&sessionId=<id>` — used by clients to
/// restore a returning session's highlighted button.
pub async fn user_vote<S>(
  State(service): State<FeedbackService<S>>,
  Query(params): Query<UserVoteParams>,
) -> Result<Json<UserVoteResponse>, ApiError>
where
  S: FeedbackStore,
{
  let vote = service
    .get_vote(&params.item_id, &params.session_id)
    .await?;
  Ok(Json(UserVoteResponse { vote }))
}
