//! Column resolution and typed field access.

use std::path::Path;

use crate::{
  error::{Error, Result},
  parse::{RawRecord, split_records},
};

// ─── Options ─────────────────────────────────────────────────────────────────

/// How a source is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
  /// Field separator, `,` unless configured otherwise.
  pub delimiter:  char,
  /// Whether the first record names the columns. Headerless sources are
  /// read positionally.
  pub has_header: bool,
}

impl Default for DecodeOptions {
  fn default() -> Self {
    Self {
      delimiter:  ',',
      has_header: true,
    }
  }
}

impl DecodeOptions {
  pub fn headed() -> Self { Self::default() }

  pub fn headerless() -> Self {
    Self {
      has_header: false,
      ..Self::default()
    }
  }

  pub fn with_delimiter(self, delimiter: char) -> Self {
    Self { delimiter, ..self }
  }
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// A column a [`Record`] reads.
///
/// Headed sources locate the column by `name` or any of `aliases`
/// (case-insensitive); headerless sources read field number `position`.
#[derive(Debug, Clone, Copy)]
pub struct Column {
  pub name:     &'static str,
  pub aliases:  &'static [&'static str],
  pub position: usize,
  pub required: bool,
}

impl Column {
  pub const fn new(name: &'static str, position: usize) -> Self {
    Self {
      name,
      aliases: &[],
      position,
      required: true,
    }
  }

  pub const fn aliases(self, aliases: &'static [&'static str]) -> Self {
    Self { aliases, ..self }
  }

  /// Absent columns (and short rows) read as empty text.
  pub const fn optional(self) -> Self {
    Self {
      required: false,
      ..self
    }
  }

  fn matches(&self, header: &str) -> bool {
    let header = header.trim();
    header.eq_ignore_ascii_case(self.name)
      || self.aliases.iter().any(|a| header.eq_ignore_ascii_case(a))
  }
}

/// A typed row shape.
pub trait Record: Sized {
  /// Every column [`Record::from_row`] reads.
  const COLUMNS: &'static [Column];

  fn from_row(row: &Row<'_>) -> Result<Self>;
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One decoded record with its columns resolved.
pub struct Row<'a> {
  source_name: &'a str,
  line:        usize,
  fields:      &'a [String],
  columns:     &'static [Column],
  /// For each entry of `columns`, the field index it was resolved to.
  layout:      &'a [Option<usize>],
}

impl<'a> Row<'a> {
  /// Trimmed text of `column`; empty for an absent optional column.
  pub fn text(&self, column: &'static str) -> Result<&'a str> {
    let Some(slot) = self.columns.iter().position(|c| c.name == column) else {
      return Err(self.missing(column));
    };
    let field = self.layout[slot].and_then(|i| self.fields.get(i));
    match field {
      Some(value) => Ok(value.trim()),
      None if self.columns[slot].required => Err(self.missing(column)),
      None => Ok(""),
    }
  }

  /// Text that must be present and non-empty, such as an identifier.
  pub fn identifier(&self, column: &'static str) -> Result<&'a str> {
    let value = self.text(column)?;
    if value.is_empty() {
      return Err(Error::EmptyField {
        source_name: self.source_name.to_owned(),
        line:        self.line,
        column,
      });
    }
    Ok(value)
  }

  /// A non-negative integer count.
  pub fn integer(&self, column: &'static str) -> Result<u32> {
    let value = self.text(column)?;
    value.parse().map_err(|_| Error::InvalidInteger {
      source_name: self.source_name.to_owned(),
      line:        self.line,
      column,
      value:       value.to_owned(),
    })
  }

  /// An optional decimal; empty text reads as `None`.
  pub fn number(&self, column: &'static str) -> Result<Option<f64>> {
    let value = self.text(column)?;
    if value.is_empty() {
      return Ok(None);
    }
    value
      .parse::<f64>()
      .ok()
      .filter(|n| n.is_finite())
      .map(Some)
      .ok_or_else(|| Error::InvalidNumber {
        source_name: self.source_name.to_owned(),
        line:        self.line,
        column,
        value:       value.to_owned(),
      })
  }

  fn missing(&self, column: &'static str) -> Error {
    Error::MissingField {
      source_name: self.source_name.to_owned(),
      line: self.line,
      column,
    }
  }
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Resolve each of `columns` against the header record.
fn resolve_header(
  columns: &'static [Column],
  header: &RawRecord,
  source_name: &str,
) -> Result<Vec<Option<usize>>> {
  columns
    .iter()
    .map(|column| {
      let found = header.fields.iter().position(|h| column.matches(h));
      match found {
        None if column.required => Err(Error::MissingColumn {
          source_name: source_name.to_owned(),
          column:      column.name,
        }),
        found => Ok(found),
      }
    })
    .collect()
}

/// Decode every record of `text` as `R`.
///
/// `source_name` labels errors; the first malformed row aborts decoding.
pub fn decode<R: Record>(
  source_name: &str,
  text: &str,
  options: &DecodeOptions,
) -> Result<Vec<R>> {
  let records = split_records(text, options.delimiter, source_name)?;
  let mut records = records.into_iter();

  let layout: Vec<Option<usize>> = if options.has_header {
    match records.next() {
      Some(header) => resolve_header(R::COLUMNS, &header, source_name)?,
      None => return Ok(Vec::new()),
    }
  } else {
    R::COLUMNS.iter().map(|c| Some(c.position)).collect()
  };

  records
    .map(|record| {
      R::from_row(&Row {
        source_name,
        line: record.line,
        fields: &record.fields,
        columns: R::COLUMNS,
        layout: &layout,
      })
    })
    .collect()
}

/// Read `path` and decode it as `R`, labelling errors with the path.
pub fn decode_file<R: Record>(
  path: impl AsRef<Path>,
  options: &DecodeOptions,
) -> Result<Vec<R>> {
  let path = path.as_ref();
  let source_name = path.display().to_string();
  let text = std::fs::read_to_string(path).map_err(|error| Error::Io {
    source_name: source_name.clone(),
    path: path.to_path_buf(),
    error,
  })?;

  let rows = decode(&source_name, &text, options)?;
  tracing::debug!(source = %source_name, rows = rows.len(), "decoded source");
  Ok(rows)
}
