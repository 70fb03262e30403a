//! Error types for the civic-records decoder.
//!
//! Every variant names the source it came from so a failed startup load can
//! be traced to the offending file and line.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{source_name}: cannot read {path:?}: {error}")]
  Io {
    source_name: String,
    path:        PathBuf,
    #[source]
    error:       std::io::Error,
  },

  #[error("{source_name}:{line}: unterminated quoted field")]
  UnterminatedQuote { source_name: String, line: usize },

  #[error("{source_name}: header has no `{column}` column")]
  MissingColumn { source_name: String, column: &'static str },

  #[error("{source_name}:{line}: row has no value for `{column}`")]
  MissingField {
    source_name: String,
    line:        usize,
    column:      &'static str,
  },

  #[error("{source_name}:{line}: `{column}` must not be empty")]
  EmptyField {
    source_name: String,
    line:        usize,
    column:      &'static str,
  },

  #[error("{source_name}:{line}: `{column}` is not a non-negative integer: {value:?}")]
  InvalidInteger {
    source_name: String,
    line:        usize,
    column:      &'static str,
    value:       String,
  },

  #[error("{source_name}:{line}: `{column}` is not a number: {value:?}")]
  InvalidNumber {
    source_name: String,
    line:        usize,
    column:      &'static str,
    value:       String,
  },
}

impl Error {
  /// The name of the source the error was raised for.
  pub fn source_name(&self) -> &str {
    match self {
      Error::Io { source_name, .. }
      | Error::UnterminatedQuote { source_name, .. }
      | Error::MissingColumn { source_name, .. }
      | Error::MissingField { source_name, .. }
      | Error::EmptyField { source_name, .. }
      | Error::InvalidInteger { source_name, .. }
      | Error::InvalidNumber { source_name, .. } => source_name,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
