//! [`LookupEngine`] — the query surface over the indexes and the
//! subscription store.

use std::sync::Arc;

use civic_core::{Result, event::EventSink, representative::Representative};

use crate::{
  follows::SubscriptionStore,
  geography::GeographyIndex,
  representatives::RepresentativeIndex,
  sink::NoopSink,
};

/// Joins the reference indexes with the subscription store at request time.
///
/// The indexes are frozen behind `Arc` once constructed, so any number of
/// tasks can query them without locking. Only follow mutations go through
/// the store's locks.
pub struct LookupEngine<E = NoopSink> {
  representatives: Arc<RepresentativeIndex>,
  geography:       Arc<GeographyIndex>,
  follows:         SubscriptionStore<E>,
}

impl<E: EventSink> LookupEngine<E> {
  pub fn new(
    representatives: Arc<RepresentativeIndex>,
    geography: Arc<GeographyIndex>,
    follows: SubscriptionStore<E>,
  ) -> Self {
    Self {
      representatives,
      geography,
      follows,
    }
  }

  pub fn representatives(&self) -> &RepresentativeIndex { &self.representatives }

  pub fn geography(&self) -> &GeographyIndex { &self.geography }

  pub fn follows(&self) -> &SubscriptionStore<E> { &self.follows }

  /// Every representative serving `address`, division by division in the
  /// order the geography index lists them. Unknown addresses yield nothing.
  pub fn resolve_by_address(&self, address: &str) -> Vec<Representative> {
    self
      .geography
      .get_divisions_for_zip(address)
      .iter()
      .flat_map(|division| self.representatives.get_by_division(division))
      .map(|rep| Representative::clone(rep))
      .collect()
  }

  /// The representatives `user_guid` follows, in follow order. GUIDs with no
  /// matching representative are skipped.
  pub async fn resolve_by_user(&self, user_guid: &str) -> Vec<Representative> {
    let follows = self.follows.list_follows(user_guid).await;
    self.resolve_guids(&follows)
  }

  pub async fn list_follows(&self, user_guid: &str) -> Vec<String> {
    self.follows.list_follows(user_guid).await
  }

  pub async fn add_follow(
    &self,
    user_guid: &str,
    rep_guid: &str,
  ) -> Result<Vec<String>> {
    self.follows.add_follow(user_guid, rep_guid).await
  }

  pub async fn remove_follow(
    &self,
    user_guid: &str,
    rep_guid: &str,
  ) -> Result<Vec<String>> {
    self.follows.remove_follow(user_guid, rep_guid).await
  }

  fn resolve_guids(&self, guids: &[String]) -> Vec<Representative> {
    guids
      .iter()
      .filter_map(|guid| {
        let rep = self.representatives.get_by_guid(guid);
        if rep.is_none() {
          tracing::debug!(guid = %guid, "followed representative not in index");
        }
        rep
      })
      .map(|rep| Representative::clone(rep))
      .collect()
  }
}
