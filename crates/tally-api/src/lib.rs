//! JSON REST API for the tally feedback ledger.
//!
//! Exposes an axum [`Router`] backed by any [`tally_core::FeedbackStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tally_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod feedback;

use std::sync::Arc;

use axum::{Router, routing::get};
use tally_core::{FeedbackService, FeedbackStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FeedbackStore + 'static,
{
  let service = FeedbackService::new(store);

  Router::new()
    .route("/feedback", get(feedback::counts::<S>).post(feedback::vote::<S>))
    .route("/feedback/user", get(feedback::user_vote::<S>))
    .with_state(service)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tally_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn router() -> Router<()> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn get_json(router: &Router<()>, uri: &str) -> (StatusCode, Value) {
    let resp = router
      .clone()
      .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
  }

  async fn post_json(router: &Router<()>, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = router
      .clone()
      .oneshot(
        Request::builder()
          .method("POST")
          .uri(uri)
          .header(header::CONTENT_TYPE, "application/json")
          .body(Body::from(body.to_string()))
          .unwrap(),
      )
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
  }

  fn vote_body(item: &str, session: &str, vote: &str) -> Value {
    json!({ "itemId": item, "sessionId": session, "voteType": vote })
  }

  // ── Counts ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn counts_on_unseen_item_returns_zeros() {
    let app = router().await;
    let (status, body) = get_json(&app, "/feedback?itemId=post-a").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "likes": 0, "dislikes": 0 }));
  }

  #[tokio::test]
  async fn counts_without_item_id_is_a_client_error() {
    let app = router().await;
    let (status, _) = get_json(&app, "/feedback").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn counts_with_blank_item_id_is_rejected() {
    let app = router().await;
    let (status, body) = get_json(&app, "/feedback?itemId=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("itemId"));
  }

  // ── Cast vote ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn first_like_returns_updated_counts() {
    let app = router().await;
    let (status, body) =
      post_json(&app, "/feedback", vote_body("post-a", "sess-1", "like")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "likes": 1, "dislikes": 0, "userVote": "like" }));
  }

  #[tokio::test]
  async fn repeated_like_toggles_off() {
    let app = router().await;
    let body = vote_body("post-a", "sess-1", "like");
    post_json(&app, "/feedback", body.clone()).await;
    let (status, resp) = post_json(&app, "/feedback", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "likes": 0, "dislikes": 0, "userVote": null }));
  }

  #[tokio::test]
  async fn like_then_dislike_switches() {
    let app = router().await;
    post_json(&app, "/feedback", vote_body("post-a", "sess-1", "like")).await;
    let (status, resp) =
      post_json(&app, "/feedback", vote_body("post-a", "sess-1", "dislike")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      resp,
      json!({ "likes": 0, "dislikes": 1, "userVote": "dislike" })
    );
  }

  #[tokio::test]
  async fn unknown_vote_type_is_rejected_without_mutation() {
    let app = router().await;
    let (status, _) =
      post_json(&app, "/feedback", vote_body("post-a", "sess-2", "meh")).await;
    assert!(status.is_client_error(), "got {status}");

    let (_, counts) = get_json(&app, "/feedback?itemId=post-a").await;
    assert_eq!(counts, json!({ "likes": 0, "dislikes": 0 }));
  }

  #[tokio::test]
  async fn missing_session_id_is_rejected() {
    let app = router().await;
    let (status, _) = post_json(
      &app,
      "/feedback",
      json!({ "itemId": "post-a", "voteType": "like" }),
    )
    .await;
    assert!(status.is_client_error(), "got {status}");
  }

  // ── Session vote lookup ─────────────────────────────────────────────────

  #[tokio::test]
  async fn user_vote_round_trip() {
    let app = router().await;

    let (_, before) =
      get_json(&app, "/feedback/user?itemId=post-a&sessionId=sess-1").await;
    assert_eq!(before, json!({ "vote": null }));

    post_json(&app, "/feedback", vote_body("post-a", "sess-1", "dislike")).await;

    let (status, after) =
      get_json(&app, "/feedback/user?itemId=post-a&sessionId=sess-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, json!({ "vote": "dislike" }));
  }
}
