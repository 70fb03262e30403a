//! Error type for `civic-index`.

use thiserror::Error;

/// Failure while loading reference data at startup.
#[derive(Debug, Error)]
pub enum Error {
  #[error("decode error: {0}")]
  Decode(#[from] civic_records::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
