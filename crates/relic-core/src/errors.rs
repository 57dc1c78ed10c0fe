//! Cross-cutting error types for relic.
//!
//! Domain-specific errors (`RegistryError`, `CacheError`, `ConfigError`) are
//! defined in their respective crates. The binary converges them through
//! `anyhow`.

use thiserror::Error;

/// Errors that can be raised while building core records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An override entry was neither `[]` nor `[owner, name, url]`.
    #[error("Invalid override entry: expected 0 or 3 elements, got {len}")]
    InvalidOverride { len: usize },

    /// A cache marker carried data where an empty array was expected.
    #[error("Invalid cache marker: expected an empty array, got {len} elements")]
    InvalidMarker { len: usize },
}
