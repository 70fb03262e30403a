//! In-memory civic data index.
//!
//! Reference data (representatives, division rosters, zip → division links)
//! is decoded once at startup into read-only indexes. Follow lists live in a
//! [`SubscriptionStore`] that publishes each change to an optional
//! [`EventSink`](civic_core::event::EventSink). [`LookupEngine`] joins the
//! two at request time.
//!
//! ```no_run
//! # async fn run() -> civic_index::Result<()> {
//! use std::sync::Arc;
//! use civic_core::event::FollowPolicy;
//! use civic_index::{DataSources, LookupEngine, SubscriptionStore, load};
//!
//! let data = load(&DataSources::default())?;
//! let engine = LookupEngine::new(
//!   Arc::new(data.representatives),
//!   Arc::new(data.geography),
//!   SubscriptionStore::from_rows(FollowPolicy::Idempotent, data.follows),
//! );
//! let reps = engine.resolve_by_address("80204");
//! # Ok(()) }
//! ```

mod group;

pub mod engine;
pub mod error;
pub mod follows;
pub mod geography;
pub mod load;
pub mod representatives;
pub mod sink;

pub use engine::LookupEngine;
pub use error::{Error, Result};
pub use follows::SubscriptionStore;
pub use geography::GeographyIndex;
pub use load::{DataSources, LoadedData, load};
pub use representatives::RepresentativeIndex;
