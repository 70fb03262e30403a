//! Follow-change events and the [`EventSink`] trait.
//!
//! Every change to a user's follow list is described by an immutable
//! [`UserRepUpdate`]. Sinks forward those records to downstream consumers; the
//! subscription store decides when to publish and what to do on failure.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::PublishError;

// ─── Actions & policy ────────────────────────────────────────────────────────

/// The kind of change applied to a follow list.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FollowAction {
  Add,
  Remove,
}

/// How the subscription store treats adding a representative the user
/// already follows.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FollowPolicy {
  /// A follow list is a set: re-adding is a no-op.
  #[default]
  Idempotent,
  /// A follow list is an ordered log: re-adding appends a duplicate, and each
  /// removal deletes one occurrence.
  #[serde(alias = "duplicates")]
  #[strum(to_string = "allow_duplicates", serialize = "duplicates")]
  AllowDuplicates,
}

// ─── Event record ────────────────────────────────────────────────────────────

/// An applied follow change, as published to the outbound event stream.
///
/// The wire keys match the topic format existing consumers read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRepUpdate {
  #[serde(rename = "UserGUID")]
  pub user_guid:   String,
  #[serde(rename = "RepGUID")]
  pub rep_guid:    String,
  #[serde(rename = "Action")]
  pub action:      FollowAction,
  #[serde(rename = "RecordedAt")]
  pub recorded_at: DateTime<Utc>,
}

impl UserRepUpdate {
  /// Build an event stamped with the current time.
  pub fn now(
    user_guid: impl Into<String>,
    rep_guid: impl Into<String>,
    action: FollowAction,
  ) -> Self {
    Self {
      user_guid: user_guid.into(),
      rep_guid: rep_guid.into(),
      action,
      recorded_at: Utc::now(),
    }
  }

  /// Serialize as a single JSON object (no trailing newline).
  pub fn to_json(&self) -> Result<String, PublishError> {
    Ok(serde_json::to_string(self)?)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Destination for [`UserRepUpdate`] events.
///
/// Implementations should return promptly; callers bound each publish with a
/// timeout and treat any error as a failed delivery.
pub trait EventSink: Send + Sync {
  /// Deliver `event` downstream.
  fn publish<'a>(
    &'a self,
    event: &'a UserRepUpdate,
  ) -> impl Future<Output = Result<(), PublishError>> + Send + 'a;
}
