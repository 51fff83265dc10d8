//! Clinical trial matching service adapter
//!
//! The matching service accepts a [`TrialQuery`](crate::core::query::TrialQuery)
//! as JSON and answers with either `{"trialIdentifiers": [...]}` or
//! `{"error": "..."}`.

pub mod client;

pub use client::{MatchingServiceClient, QUERY_CONTENT_TYPE};
