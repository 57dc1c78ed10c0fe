//! # relic-cache
//!
//! File-backed stores consulted by the classifier:
//! - [`OverrideTable`]: manually curated, read-only, loaded once per run
//! - [`ClassificationCache`]: names already classified as compatible,
//!   persisted across runs and flushed when the guard is dropped

mod classification;
mod error;
mod overrides;

pub use classification::ClassificationCache;
pub use error::CacheError;
pub use overrides::OverrideTable;
