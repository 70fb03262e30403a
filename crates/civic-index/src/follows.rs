//! [`SubscriptionStore`] — each user's ordered list of followed
//! representatives.
//!
//! The store is the only mutable state in the index. The user map sits behind
//! a short-lived `std` mutex; each user's list has its own async mutex, held
//! for the whole mutate-then-publish sequence. Mutations for one user are
//! therefore serialised, while different users proceed independently.
//!
//! A change is published to the configured [`EventSink`] before the call
//! returns. If publishing fails or times out, the change is undone under the
//! same lock and the caller gets [`civic_core::Error::Publish`]: the list and
//! the event stream never disagree.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, PoisonError},
  time::Duration,
};

use civic_core::{
  Error,
  PublishError,
  Result,
  event::{EventSink, FollowAction, FollowPolicy, UserRepUpdate},
};
use civic_records::FollowRow;

use crate::sink::NoopSink;

/// Default bound on a single event publish.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(2);

type FollowList = Arc<tokio::sync::Mutex<Vec<String>>>;

pub struct SubscriptionStore<E = NoopSink> {
  users:           Mutex<HashMap<String, FollowList>>,
  policy:          FollowPolicy,
  sink:            Option<Arc<E>>,
  publish_timeout: Duration,
}

impl SubscriptionStore {
  /// An empty store with no event sink.
  pub fn new(policy: FollowPolicy) -> Self {
    Self::from_rows(policy, std::iter::empty())
  }

  /// A store pre-populated from user-follows rows. Seeding publishes no
  /// events; `policy` applies to the seed rows as it does to later adds.
  pub fn from_rows(
    policy: FollowPolicy,
    rows: impl IntoIterator<Item = FollowRow>,
  ) -> Self {
    let mut lists: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
      let follows = lists.entry(row.user_guid).or_default();
      if policy == FollowPolicy::Idempotent && follows.contains(&row.rep_guid) {
        continue;
      }
      follows.push(row.rep_guid);
    }

    let users = lists
      .into_iter()
      .map(|(user, follows)| (user, Arc::new(tokio::sync::Mutex::new(follows))))
      .collect();

    Self {
      users: Mutex::new(users),
      policy,
      sink: None,
      publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
    }
  }
}

impl<E: EventSink> SubscriptionStore<E> {
  /// Publish every applied change to `sink`.
  pub fn with_sink<S: EventSink>(self, sink: Arc<S>) -> SubscriptionStore<S> {
    self.with_optional_sink(Some(sink))
  }

  /// Like [`with_sink`](Self::with_sink); `None` leaves publishing disabled.
  pub fn with_optional_sink<S: EventSink>(
    self,
    sink: Option<Arc<S>>,
  ) -> SubscriptionStore<S> {
    SubscriptionStore {
      users: self.users,
      policy: self.policy,
      sink,
      publish_timeout: self.publish_timeout,
    }
  }

  /// Bound each publish by `timeout`; a publish that takes longer fails the
  /// mutation.
  pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
    self.publish_timeout = timeout;
    self
  }

  /// Follow `rep_guid` on behalf of `user_guid`, returning the updated list.
  ///
  /// Under [`FollowPolicy::Idempotent`], following an already-followed
  /// representative changes nothing and publishes nothing.
  pub async fn add_follow(
    &self,
    user_guid: &str,
    rep_guid: &str,
  ) -> Result<Vec<String>> {
    let list = self.list_for(user_guid);
    let mut follows = list.lock().await;

    if self.policy == FollowPolicy::Idempotent
      && follows.iter().any(|g| g == rep_guid)
    {
      tracing::debug!(user_guid, rep_guid, "already following");
      return Ok(follows.clone());
    }

    follows.push(rep_guid.to_owned());
    if let Err(source) = self.publish(user_guid, rep_guid, FollowAction::Add).await {
      follows.pop();
      return Err(self.rolled_back(user_guid, rep_guid, source));
    }

    tracing::debug!(user_guid, rep_guid, count = follows.len(), "follow added");
    Ok(follows.clone())
  }

  /// Stop following the first occurrence of `rep_guid`, returning the updated
  /// list. Unfollowing a representative that is not followed is a no-op.
  pub async fn remove_follow(
    &self,
    user_guid: &str,
    rep_guid: &str,
  ) -> Result<Vec<String>> {
    let Some(list) = self.existing(user_guid) else {
      return Ok(Vec::new());
    };
    let mut follows = list.lock().await;

    let Some(index) = follows.iter().position(|g| g == rep_guid) else {
      tracing::debug!(user_guid, rep_guid, "not following; nothing to remove");
      return Ok(follows.clone());
    };

    let removed = follows.remove(index);
    if let Err(source) = self.publish(user_guid, rep_guid, FollowAction::Remove).await {
      follows.insert(index, removed);
      return Err(self.rolled_back(user_guid, rep_guid, source));
    }

    tracing::debug!(user_guid, rep_guid, count = follows.len(), "follow removed");
    Ok(follows.clone())
  }

  /// The user's follow list in follow order; empty for an unknown user.
  pub async fn list_follows(&self, user_guid: &str) -> Vec<String> {
    match self.existing(user_guid) {
      Some(list) => list.lock().await.clone(),
      None => Vec::new(),
    }
  }

  /// Number of users with a follow list.
  pub fn user_count(&self) -> usize { self.users().len() }

  // ── Internals ─────────────────────────────────────────────────────────

  fn users(&self) -> std::sync::MutexGuard<'_, HashMap<String, FollowList>> {
    // The map is never left half-updated, so a poisoned lock is still usable.
    self.users.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn existing(&self, user_guid: &str) -> Option<FollowList> {
    self.users().get(user_guid).cloned()
  }

  fn list_for(&self, user_guid: &str) -> FollowList {
    Arc::clone(self.users().entry(user_guid.to_owned()).or_default())
  }

  async fn publish(
    &self,
    user_guid: &str,
    rep_guid: &str,
    action: FollowAction,
  ) -> Result<(), PublishError> {
    let Some(sink) = &self.sink else {
      return Ok(());
    };
    let event = UserRepUpdate::now(user_guid, rep_guid, action);
    match tokio::time::timeout(self.publish_timeout, sink.publish(&event)).await {
      Ok(result) => result,
      Err(_) => Err(PublishError::Timeout(self.publish_timeout)),
    }
  }

  fn rolled_back(
    &self,
    user_guid: &str,
    rep_guid: &str,
    source: PublishError,
  ) -> Error {
    tracing::warn!(user_guid, rep_guid, error = %source, "event publish failed; follow change rolled back");
    Error::Publish {
      user_guid: user_guid.to_owned(),
      rep_guid: rep_guid.to_owned(),
      source,
    }
  }
}
