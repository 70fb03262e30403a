//! Startup loading of reference data from delimited files.

use std::path::PathBuf;

use civic_records::{
  DecodeOptions, FollowRow, OfficialRow, RepresentativeRow, ZipDivisionRow,
  decode_file,
};
use serde::Deserialize;

use crate::{
  Result, geography::GeographyIndex, representatives::RepresentativeIndex,
};

/// Where the reference data lives, deserialised from the `[data]` table of
/// the server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSources {
  /// Chamber rosters with header rows, loaded in order; a GUID in a later
  /// file replaces the same GUID from an earlier one.
  #[serde(default)]
  pub representatives: Vec<PathBuf>,
  /// Headerless `office, name, location, division, guid` rows.
  pub officials:       Option<PathBuf>,
  /// Headerless `zip, division` rows.
  pub zip_divisions:   Option<PathBuf>,
  /// `user_guid, rep_guid` rows with a header, used to seed follow lists.
  pub user_follows:    Option<PathBuf>,
  #[serde(default = "default_delimiter")]
  pub delimiter:       char,
}

fn default_delimiter() -> char { ',' }

impl Default for DataSources {
  fn default() -> Self {
    Self {
      representatives: Vec::new(),
      officials:       None,
      zip_divisions:   None,
      user_follows:    None,
      delimiter:       default_delimiter(),
    }
  }
}

/// Everything read at startup. The indexes are complete and ready to be
/// frozen behind `Arc`.
#[derive(Debug, Default)]
pub struct LoadedData {
  pub representatives: RepresentativeIndex,
  pub geography:       GeographyIndex,
  pub follows:         Vec<FollowRow>,
}

/// Decode every configured source and build the indexes.
///
/// Any malformed file fails the whole load: the service cannot answer
/// correctly from partial reference data.
pub fn load(sources: &DataSources) -> Result<LoadedData> {
  let headed = DecodeOptions::headed().with_delimiter(sources.delimiter);
  let headerless = DecodeOptions::headerless().with_delimiter(sources.delimiter);

  let mut data = LoadedData::default();

  for path in &sources.representatives {
    let rows = decode_file::<RepresentativeRow>(path, &headed)?;
    let loaded = data.representatives.load_representatives(rows);
    tracing::info!(path = %path.display(), rows = loaded, "loaded roster");
  }

  if let Some(path) = &sources.officials {
    let rows = decode_file::<OfficialRow>(path, &headerless)?;
    data.representatives.load_division_groups(rows);
    tracing::info!(
      path = %path.display(),
      divisions = data.representatives.division_count(),
      "loaded division rosters"
    );
  }

  if let Some(path) = &sources.zip_divisions {
    let rows = decode_file::<ZipDivisionRow>(path, &headerless)?;
    data.geography.load_zip_divisions(rows);
    tracing::info!(
      path = %path.display(),
      zips = data.geography.len(),
      "loaded zip divisions"
    );
  }

  if let Some(path) = &sources.user_follows {
    data.follows = decode_file::<FollowRow>(path, &headed)?;
    tracing::info!(
      path = %path.display(),
      rows = data.follows.len(),
      "loaded user follows"
    );
  }

  tracing::info!(
    representatives = data.representatives.len(),
    divisions = data.representatives.division_count(),
    zips = data.geography.len(),
    "reference data ready"
  );
  Ok(data)
}
