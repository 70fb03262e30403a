//! Error types for `civic-core`.

use std::time::Duration;

use thiserror::Error;

/// Failure reported by an [`EventSink`](crate::event::EventSink).
#[derive(Debug, Error)]
pub enum PublishError {
  #[error("event sink did not accept the event within {0:?}")]
  Timeout(Duration),

  #[error("event sink is closed")]
  Closed,

  #[error("event sink rejected the event: {0}")]
  Rejected(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
  /// A follow mutation was rolled back because its event could not be
  /// published.
  #[error("follow change {user_guid} -> {rep_guid} not applied: {source}")]
  Publish {
    user_guid: String,
    rep_guid:  String,
    #[source]
    source:    PublishError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
