//! Delimited-record decoder for civic reference data.
//!
//! Parses CSV-style text into typed rows. Pure synchronous; performs type
//! conformance only (counts are integers, identifiers are non-empty) and no
//! business-rule validation.
//!
//! # Quick start
//!
//! ```no_run
//! use civic_records::{DecodeOptions, RepresentativeRow, decode_file};
//!
//! let rows: Vec<RepresentativeRow> =
//!   decode_file("data/house_members.csv", &DecodeOptions::headed()).unwrap();
//! println!("{} members", rows.len());
//! ```

pub mod error;
mod parse;
mod record;
mod rows;

pub use error::{Error, Result};
pub use record::{Column, DecodeOptions, Record, Row, decode, decode_file};
pub use rows::{FollowRow, OfficialRow, RepresentativeRow, ZipDivisionRow};
