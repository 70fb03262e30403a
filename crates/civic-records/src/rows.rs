//! The row shapes read at startup.

use crate::{
  error::Result,
  record::{Column, Record, Row},
};

// ─── Representatives ─────────────────────────────────────────────────────────

/// A member record from a chamber roster export.
///
/// Header names follow the roster export (`id`, `title`, `state`, `ocd_id`,
/// `twitter_account`); the descriptive names are accepted as aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct RepresentativeRow {
  pub guid:                 String,
  pub office_title:         String,
  pub first_name:           String,
  pub last_name:            String,
  pub location:             String,
  pub division_id:          String,
  pub url:                  String,
  pub twitter:              String,
  pub total_votes:          u32,
  pub missed_votes:         u32,
  pub present_votes:        u32,
  pub votes_with_party_pct: Option<f64>,
}

impl Record for RepresentativeRow {
  const COLUMNS: &'static [Column] = &[
    Column::new("id", 0).aliases(&["guid"]),
    Column::new("title", 1).aliases(&["office_title", "office"]).optional(),
    Column::new("first_name", 2).aliases(&["name"]).optional(),
    Column::new("last_name", 3).optional(),
    Column::new("state", 4).aliases(&["location"]).optional(),
    Column::new("ocd_id", 5).aliases(&["division_id", "division"]).optional(),
    Column::new("url", 6).aliases(&["gov_web"]).optional(),
    Column::new("twitter_account", 7).aliases(&["twitter"]).optional(),
    Column::new("total_votes", 8),
    Column::new("missed_votes", 9),
    Column::new("present_votes", 10),
    Column::new("votes_with_party_pct", 11).optional(),
  ];

  fn from_row(row: &Row<'_>) -> Result<Self> {
    Ok(Self {
      guid:                 row.identifier("id")?.to_owned(),
      office_title:         row.text("title")?.to_owned(),
      first_name:           row.text("first_name")?.to_owned(),
      last_name:            row.text("last_name")?.to_owned(),
      location:             row.text("state")?.to_owned(),
      division_id:          row.text("ocd_id")?.to_owned(),
      url:                  row.text("url")?.to_owned(),
      twitter:              row.text("twitter_account")?.to_owned(),
      total_votes:          row.integer("total_votes")?,
      missed_votes:         row.integer("missed_votes")?,
      present_votes:        row.integer("present_votes")?,
      votes_with_party_pct: row.number("votes_with_party_pct")?,
    })
  }
}

// ─── Division groups ─────────────────────────────────────────────────────────

/// One official in a division roster: `office, name, location, division,
/// guid`, read positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficialRow {
  pub office:      String,
  pub name:        String,
  pub location:    String,
  pub division_id: String,
  pub guid:        String,
}

impl Record for OfficialRow {
  const COLUMNS: &'static [Column] = &[
    Column::new("office", 0),
    Column::new("name", 1),
    Column::new("location", 2).optional(),
    Column::new("division", 3).aliases(&["division_id", "ocd_id"]),
    Column::new("guid", 4).aliases(&["id"]),
  ];

  fn from_row(row: &Row<'_>) -> Result<Self> {
    Ok(Self {
      office:      row.text("office")?.to_owned(),
      name:        row.text("name")?.to_owned(),
      location:    row.text("location")?.to_owned(),
      division_id: row.identifier("division")?.to_owned(),
      guid:        row.identifier("guid")?.to_owned(),
    })
  }
}

// ─── Key/value pairs ─────────────────────────────────────────────────────────

/// A zip code served by a division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipDivisionRow {
  pub zip:         String,
  pub division_id: String,
}

impl Record for ZipDivisionRow {
  const COLUMNS: &'static [Column] = &[
    Column::new("zip", 0).aliases(&["zipcode", "zip_code"]),
    Column::new("division_id", 1).aliases(&["division", "ocd_id"]),
  ];

  fn from_row(row: &Row<'_>) -> Result<Self> {
    Ok(Self {
      zip:         row.identifier("zip")?.to_owned(),
      division_id: row.identifier("division_id")?.to_owned(),
    })
  }
}

/// A representative a user follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowRow {
  pub user_guid: String,
  pub rep_guid:  String,
}

impl Record for FollowRow {
  const COLUMNS: &'static [Column] = &[
    Column::new("user_guid", 0),
    Column::new("rep_guid", 1),
  ];

  fn from_row(row: &Row<'_>) -> Result<Self> {
    Ok(Self {
      user_guid: row.identifier("user_guid")?.to_owned(),
      rep_guid:  row.identifier("rep_guid")?.to_owned(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{DecodeOptions, Error, decode};

  const ROSTER: &str = "\
id,title,first_name,last_name,state,ocd_id,url,twitter_account,total_votes,missed_votes,present_votes,votes_with_party_pct
D000197,Representative,Diana,DeGette,CO,ocd-division/country:us/state:co/cd:1,https://degette.house.gov,RepDianaDeGette,956,27,0,96.81
N000191,Representative,Joe,Neguse,CO,ocd-division/country:us/state:co/cd:2,,,956,4,1,
";

  #[test]
  fn roster_rows_resolve_by_header_name() {
    let rows: Vec<RepresentativeRow> =
      decode("house.csv", ROSTER, &DecodeOptions::headed()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].guid, "D000197");
    assert_eq!(rows[0].division_id, "ocd-division/country:us/state:co/cd:1");
    assert_eq!(rows[0].twitter, "RepDianaDeGette");
    assert_eq!(rows[0].missed_votes, 27);
    assert_eq!(rows[0].votes_with_party_pct, Some(96.81));
    assert_eq!(rows[1].url, "");
    assert_eq!(rows[1].votes_with_party_pct, None);
  }

  #[test]
  fn reordered_header_with_aliases() {
    let text = "total_votes,missed_votes,present_votes,guid,office_title\n10,1,0,S1,Senator\n";
    let rows: Vec<RepresentativeRow> =
      decode("senate.csv", text, &DecodeOptions::headed()).unwrap();
    assert_eq!(rows[0].guid, "S1");
    assert_eq!(rows[0].office_title, "Senator");
    assert_eq!(rows[0].total_votes, 10);
    assert_eq!(rows[0].last_name, "");
  }

  #[test]
  fn header_without_required_column_is_rejected() {
    let text = "id,title,missed_votes,present_votes\nX,Senator,1,0\n";
    let err = decode::<RepresentativeRow>("senate.csv", text, &DecodeOptions::headed())
      .unwrap_err();
    assert!(matches!(err, Error::MissingColumn { column: "total_votes", .. }));
    assert_eq!(err.source_name(), "senate.csv");
  }

  #[test]
  fn non_numeric_count_names_row_and_column() {
    let text = "id,total_votes,missed_votes,present_votes\nA,10,1,0\nB,ten,1,0\n";
    let err = decode::<RepresentativeRow>("house.csv", text, &DecodeOptions::headed())
      .unwrap_err();
    match err {
      Error::InvalidInteger { source_name, line, column, value } => {
        assert_eq!(source_name, "house.csv");
        assert_eq!(line, 3);
        assert_eq!(column, "total_votes");
        assert_eq!(value, "ten");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn negative_count_is_rejected() {
    let text = "id,total_votes,missed_votes,present_votes\nA,10,-1,0\n";
    let err = decode::<RepresentativeRow>("house.csv", text, &DecodeOptions::headed())
      .unwrap_err();
    assert!(matches!(err, Error::InvalidInteger { column: "missed_votes", .. }));
  }

  #[test]
  fn bad_party_percentage_is_rejected() {
    let text = "id,total_votes,missed_votes,present_votes,votes_with_party_pct\nA,10,1,0,n/a\n";
    let err = decode::<RepresentativeRow>("house.csv", text, &DecodeOptions::headed())
      .unwrap_err();
    assert!(matches!(err, Error::InvalidNumber { line: 2, .. }));
  }

  #[test]
  fn empty_guid_is_rejected() {
    let text = "id,total_votes,missed_votes,present_votes\n ,10,1,0\n";
    let err = decode::<RepresentativeRow>("house.csv", text, &DecodeOptions::headed())
      .unwrap_err();
    assert!(matches!(err, Error::EmptyField { column: "id", line: 2, .. }));
  }

  #[test]
  fn officials_read_positionally() {
    let text = "\
U.S. Senator,Michael F. Bennet,Colorado,ocd-division/country:us/state:co,2dd55a622eb3e8a594b36576fb1bbb
\"CO Supreme Court Justice\",\"Carlos A. Samour, Jr.\",Colorado,ocd-division/country:us/state:co,c1
";
    let rows: Vec<OfficialRow> =
      decode("officials.csv", text, &DecodeOptions::headerless()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].guid, "2dd55a622eb3e8a594b36576fb1bbb");
    assert_eq!(rows[1].name, "Carlos A. Samour, Jr.");
  }

  #[test]
  fn short_official_row_is_rejected() {
    let text = "Governor,Jared Polis,Colorado\n";
    let err = decode::<OfficialRow>("officials.csv", text, &DecodeOptions::headerless())
      .unwrap_err();
    assert!(matches!(err, Error::MissingField { column: "division", line: 1, .. }));
  }

  #[test]
  fn pairs_decode_with_and_without_header() {
    let zips: Vec<ZipDivisionRow> = decode(
      "zips.csv",
      "80204,ocd-division/country:us\n80204,ocd-division/country:us/state:co\n",
      &DecodeOptions::headerless(),
    )
    .unwrap();
    assert_eq!(zips[1].division_id, "ocd-division/country:us/state:co");

    let follows: Vec<FollowRow> = decode(
      "follows.csv",
      "user_guid,rep_guid\nu1,D000197\n",
      &DecodeOptions::headed(),
    )
    .unwrap();
    assert_eq!(follows, vec![FollowRow {
      user_guid: "u1".into(),
      rep_guid:  "D000197".into(),
    }]);
  }

  #[test]
  fn header_only_source_is_empty() {
    let rows: Vec<FollowRow> =
      decode("follows.csv", "user_guid,rep_guid\n", &DecodeOptions::headed()).unwrap();
    assert!(rows.is_empty());
  }
}
