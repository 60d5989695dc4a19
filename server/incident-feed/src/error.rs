//! Structured error types for the feed pipeline.

use thiserror::Error;

use crate::types::FailureKind;

#[derive(Debug, Error)]
pub enum FeedError {
  /// A location or incident fetch failed; fatal to the current run.
  #[error("source unavailable: {context}: {reason}")]
  SourceUnavailable { context: String, reason: String },

  /// A record breaks a contract the pipeline cannot uphold (e.g. empty id).
  #[error("invariant: {field}: {reason}")]
  Invariant { field: String, reason: String },

  /// run() was invoked while a run is already in flight.
  #[error("pipeline is already running")]
  AlreadyRunning,

  /// The configured run timeout elapsed before the pipeline finished.
  #[error("run timed out after {0} ms")]
  Timeout(u64),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl FeedError {
  pub fn source(context: &str, reason: impl Into<String>) -> Self {
    Self::SourceUnavailable {
      context: context.to_string(),
      reason: reason.into(),
    }
  }

  pub fn invariant(field: &str, reason: &str) -> Self {
    Self::Invariant {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Classification published in the Failed pipeline state.
  pub fn kind(&self) -> FailureKind {
    match self {
      Self::SourceUnavailable { .. } => FailureKind::SourceUnavailable,
      Self::Invariant { .. } | Self::Json(_) => FailureKind::InvariantViolation,
      Self::Timeout(_) => FailureKind::Timeout,
      Self::AlreadyRunning => FailureKind::Busy,
    }
  }
}
