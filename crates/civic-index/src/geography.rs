//! [`GeographyIndex`] — the divisions serving each zip code.

use std::collections::HashMap;

use civic_records::ZipDivisionRow;

use crate::group::group_into;

/// Zip code → division IDs, built at startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct GeographyIndex {
  by_zip: HashMap<String, Vec<String>>,
}

impl GeographyIndex {
  pub fn new() -> Self { Self::default() }

  /// Group `(zip, division)` rows by zip. Rows need not be sorted; each zip
  /// lists its divisions in first-seen order without repeats.
  pub fn load_zip_divisions(
    &mut self,
    rows: impl IntoIterator<Item = ZipDivisionRow>,
  ) {
    group_into(
      &mut self.by_zip,
      rows.into_iter().map(|row| (row.zip, row.division_id)),
    );
    for divisions in self.by_zip.values_mut() {
      let mut seen = Vec::with_capacity(divisions.len());
      divisions.retain(|d| {
        if seen.contains(d) {
          return false;
        }
        seen.push(d.clone());
        true
      });
    }
  }

  /// Divisions for an exact address key (normally a zip code); empty if the
  /// key is unknown.
  pub fn get_divisions_for_zip(&self, address: &str) -> &[String] {
    self
      .by_zip
      .get(address)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// Number of distinct zip codes.
  pub fn len(&self) -> usize { self.by_zip.len() }

  pub fn is_empty(&self) -> bool { self.by_zip.is_empty() }
}
