//! Delimited-text tokenizer.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_records()   → Vec<RawRecord>   (quoting, line tracking)
//!          └─ Layout::resolve() → column → field index
//!               └─ Record::from_row() → typed rows

use crate::error::{Error, Result};

/// One physical record: its fields and the line it started on.
#[derive(Debug)]
pub(crate) struct RawRecord {
  pub line:   usize,
  pub fields: Vec<String>,
}

impl RawRecord {
  fn is_blank(&self) -> bool {
    self.fields.iter().all(|f| f.trim().is_empty())
  }
}

/// Split `text` into records.
///
/// A field that starts with `"` is quoted: it may contain the delimiter and
/// line breaks, and `""` stands for a literal quote. Both `\n` and `\r\n`
/// terminate a record. Blank records are dropped; a leading UTF-8 BOM is
/// ignored.
pub(crate) fn split_records(
  text: &str,
  delimiter: char,
  source_name: &str,
) -> Result<Vec<RawRecord>> {
  let text = text.strip_prefix('\u{feff}').unwrap_or(text);

  let mut records = Vec::new();
  let mut fields: Vec<String> = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;
  let mut line = 1usize;
  let mut record_line = 1usize;
  let mut chars = text.chars().peekable();

  while let Some(c) = chars.next() {
    if in_quotes {
      match c {
        '"' if chars.peek() == Some(&'"') => {
          chars.next();
          field.push('"');
        }
        '"' => in_quotes = false,
        '\n' => {
          line += 1;
          field.push('\n');
        }
        _ => field.push(c),
      }
      continue;
    }

    match c {
      '"' if field.is_empty() => in_quotes = true,
      '\r' if chars.peek() == Some(&'\n') => {}
      '\n' => {
        fields.push(std::mem::take(&mut field));
        push_record(&mut records, record_line, std::mem::take(&mut fields));
        line += 1;
        record_line = line;
      }
      c if c == delimiter => fields.push(std::mem::take(&mut field)),
      _ => field.push(c),
    }
  }

  if in_quotes {
    return Err(Error::UnterminatedQuote {
      source_name: source_name.to_owned(),
      line:        record_line,
    });
  }

  if !field.is_empty() || !fields.is_empty() {
    fields.push(field);
    push_record(&mut records, record_line, fields);
  }

  Ok(records)
}

fn push_record(records: &mut Vec<RawRecord>, line: usize, fields: Vec<String>) {
  let record = RawRecord { line, fields };
  if !record.is_blank() {
    records.push(record);
  }
}
