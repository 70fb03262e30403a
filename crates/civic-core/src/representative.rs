//! Representative — a public official and their voting record.
//!
//! Representatives are built once from reference data at startup and never
//! modified afterwards. The derived percentage fields are computed at
//! construction from the raw vote counts.

use serde::{Deserialize, Serialize};

// ─── Vote counts ─────────────────────────────────────────────────────────────

/// Raw roll-call counts for a representative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
  pub total:   u32,
  pub missed:  u32,
  pub present: u32,
}

impl VoteTally {
  pub fn new(total: u32, missed: u32, present: u32) -> Self {
    Self {
      total,
      missed,
      present,
    }
  }

  /// `part` as a percentage of `total`, rounded to two decimal places.
  ///
  /// A tally with no recorded votes yields `0.0` for every part.
  pub fn percent_of(&self, part: u32) -> f64 {
    if self.total == 0 {
      return 0.0;
    }
    round2(100.0 * f64::from(part) / f64::from(self.total))
  }

  pub fn percent_missed(&self) -> f64 { self.percent_of(self.missed) }

  pub fn percent_present(&self) -> f64 { self.percent_of(self.present) }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }

// ─── Representative ──────────────────────────────────────────────────────────

/// Descriptive fields of a representative, before vote-derived values are
/// attached.
#[derive(Debug, Clone, Default)]
pub struct Profile {
  pub guid:        String,
  pub office:      String,
  pub name:        String,
  pub last_name:   String,
  pub location:    String,
  pub division:    String,
  pub gov_website: String,
  pub twitter:     String,
}

/// An elected official as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representative {
  pub guid:                     String,
  pub office:                   String,
  /// Given name; the full display name for officials without a split name.
  pub name:                     String,
  pub last_name:                String,
  /// Jurisdiction label, e.g. a state code or "Denver County".
  pub location:                 String,
  /// Opaque division identifier (usually an OCD ID).
  pub division:                 String,
  #[serde(rename = "gov_web")]
  pub gov_website:              String,
  pub twitter:                  String,
  pub total_votes:              u32,
  pub missed_votes:             u32,
  pub present_votes:            u32,
  pub percent_missed_votes:     f64,
  pub percent_present_votes:    f64,
  pub percent_votes_with_party: f64,
}

impl Representative {
  /// Build a representative, computing the missed and present percentages
  /// from `votes`. `votes_with_party_pct` is taken as reported, or `0.0` when
  /// the source did not carry it.
  pub fn new(
    profile: Profile,
    votes: VoteTally,
    votes_with_party_pct: Option<f64>,
  ) -> Self {
    Self {
      guid:                     profile.guid,
      office:                   profile.office,
      name:                     profile.name,
      last_name:                profile.last_name,
      location:                 profile.location,
      division:                 profile.division,
      gov_website:              profile.gov_website,
      twitter:                  profile.twitter,
      total_votes:              votes.total,
      missed_votes:             votes.missed,
      present_votes:            votes.present,
      percent_missed_votes:     votes.percent_missed(),
      percent_present_votes:    votes.percent_present(),
      percent_votes_with_party: votes_with_party_pct.unwrap_or(0.0),
    }
  }

  pub fn votes(&self) -> VoteTally {
    VoteTally::new(self.total_votes, self.missed_votes, self.present_votes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn profile(guid: &str) -> Profile {
    Profile {
      guid: guid.into(),
      office: "U.S. Representative".into(),
      name: "Diana".into(),
      last_name: "DeGette".into(),
      location: "CO".into(),
      division: "ocd-division/country:us/state:co/cd:1".into(),
      ..Profile::default()
    }
  }

  #[test]
  fn missed_percentage_of_round_total() {
    let tally = VoteTally::new(100, 7, 3);
    assert_eq!(tally.percent_missed(), 7.0);
    assert_eq!(tally.percent_present(), 3.0);
  }

  #[test]
  fn percentages_round_to_two_places() {
    let tally = VoteTally::new(3, 1, 2);
    assert_eq!(tally.percent_missed(), 33.33);
    assert_eq!(tally.percent_present(), 66.67);
  }

  #[test]
  fn zero_total_yields_zero_percent() {
    let tally = VoteTally::new(0, 0, 0);
    assert_eq!(tally.percent_missed(), 0.0);
    assert_eq!(tally.percent_present(), 0.0);
    assert!(!tally.percent_of(5).is_nan());
  }

  #[test]
  fn new_representative_derives_percentages() {
    let rep = Representative::new(
      profile("D000197"),
      VoteTally::new(956, 27, 0),
      Some(96.81),
    );
    assert_eq!(rep.percent_missed_votes, 2.82);
    assert_eq!(rep.percent_present_votes, 0.0);
    assert_eq!(rep.percent_votes_with_party, 96.81);
    assert_eq!(rep.votes(), VoteTally::new(956, 27, 0));
  }

  #[test]
  fn serializes_with_wire_field_names() {
    let rep = Representative::new(profile("D000197"), VoteTally::default(), None);
    let json = serde_json::to_value(&rep).unwrap();
    assert_eq!(json["guid"], "D000197");
    assert_eq!(json["gov_web"], "");
    assert_eq!(json["percent_votes_with_party"], 0.0);
  }
}
