//! Core types and trait definitions for the tally feedback ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod service;
pub mod store;
pub mod vote;

pub use error::{Error, Result, ServiceError};
pub use service::FeedbackService;
pub use store::FeedbackStore;
pub use vote::{
  FeedbackItem, ItemCounts, Transition, VoteReceipt, VoteType, transition,
};
