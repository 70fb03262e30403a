//! [`RepresentativeIndex`] — representatives by GUID and by division.

use std::{collections::HashMap, sync::Arc};

use civic_core::representative::{Profile, Representative, VoteTally};
use civic_records::{OfficialRow, RepresentativeRow};

use crate::group::group_into;

/// Reference data about representatives, built at startup and read-only
/// afterwards.
///
/// Representatives are shared by `Arc` between the GUID map and the division
/// lists; nothing mutates them after construction.
#[derive(Debug, Default)]
pub struct RepresentativeIndex {
  by_guid:     HashMap<String, Arc<Representative>>,
  by_division: HashMap<String, Vec<Arc<Representative>>>,
}

impl RepresentativeIndex {
  pub fn new() -> Self { Self::default() }

  /// Insert roster rows into the GUID map, deriving vote percentages.
  ///
  /// A row whose GUID is already present replaces the earlier entry, so a
  /// later roster file supersedes an earlier one. Returns the number of rows
  /// loaded.
  pub fn load_representatives(
    &mut self,
    rows: impl IntoIterator<Item = RepresentativeRow>,
  ) -> usize {
    let mut loaded = 0;
    for row in rows {
      let rep = Arc::new(from_roster(row));
      if let Some(prev) = self.by_guid.insert(rep.guid.clone(), rep) {
        tracing::debug!(guid = %prev.guid, "representative replaced by later row");
      }
      loaded += 1;
    }
    loaded
  }

  /// Group division roster rows by division, keeping source order within each
  /// division.
  ///
  /// Rows need not be sorted. An official whose GUID is already in the GUID
  /// map is served as that representative, so its office, name, location
  /// and division come from the roster file and the official row only
  /// places it in the division. Any other official is built from the
  /// official row alone, with no voting record.
  pub fn load_division_groups(
    &mut self,
    rows: impl IntoIterator<Item = OfficialRow>,
  ) {
    let by_guid = &self.by_guid;
    let pairs = rows.into_iter().map(|row| {
      let rep = match by_guid.get(&row.guid) {
        Some(known) => Arc::clone(known),
        None => Arc::new(from_official(&row)),
      };
      (row.division_id, rep)
    });
    group_into(&mut self.by_division, pairs);
  }

  pub fn get_by_guid(&self, guid: &str) -> Option<&Arc<Representative>> {
    self.by_guid.get(guid)
  }

  /// Representatives of `division_id` in roster order; empty if unknown.
  pub fn get_by_division(&self, division_id: &str) -> &[Arc<Representative>] {
    self
      .by_division
      .get(division_id)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// Number of distinct GUIDs.
  pub fn len(&self) -> usize { self.by_guid.len() }

  pub fn is_empty(&self) -> bool { self.by_guid.is_empty() }

  pub fn division_count(&self) -> usize { self.by_division.len() }
}

fn from_roster(row: RepresentativeRow) -> Representative {
  Representative::new(
    Profile {
      guid:        row.guid,
      office:      row.office_title,
      name:        row.first_name,
      last_name:   row.last_name,
      location:    row.location,
      division:    row.division_id,
      gov_website: row.url,
      twitter:     row.twitter,
    },
    VoteTally::new(row.total_votes, row.missed_votes, row.present_votes),
    row.votes_with_party_pct,
  )
}

fn from_official(row: &OfficialRow) -> Representative {
  Representative::new(
    Profile {
      guid: row.guid.clone(),
      office: row.office.clone(),
      name: row.name.clone(),
      location: row.location.clone(),
      division: row.division_id.clone(),
      ..Profile::default()
    },
    VoteTally::default(),
    None,
  )
}
