//! Traits for the external collaborators the pipeline pulls from.
//!
//! All calls are blocking. Implementations live in `relic-registry`
//! (network) and `relic-cache` (persistent store); tests substitute
//! in-memory fakes.

use std::collections::HashSet;

use crate::RegistryMetadata;

/// Per-package registry metadata lookup.
pub trait MetadataSource {
    type Error: std::error::Error;

    /// Fetch metadata for one package.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` on transport failure or non-success status.
    fn fetch_metadata(&self, name: &str) -> Result<RegistryMetadata, Self::Error>;
}

/// Black-box check for current-runtime support.
///
/// Consulted after the single metadata fetch for a package; `metadata` is
/// that document, or `None` when the fetch failed. Oracles that answer from
/// elsewhere can ignore it.
pub trait CompatibilityOracle {
    type Error: std::error::Error;

    /// `true` when the package is known to support the current runtime.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the oracle cannot answer.
    fn supports_current_runtime(
        &self,
        name: &str,
        metadata: Option<&RegistryMetadata>,
    ) -> Result<bool, Self::Error>;
}

/// Repository popularity lookup.
pub trait StarSource {
    /// Star count for `owner/name`, or `None` when it cannot be determined.
    fn fetch_star_count(&self, owner: &str, name: &str) -> Option<u64>;
}

/// Store of names already classified as compatible.
pub trait ClassificationStore {
    fn is_marked_compatible(&self, name: &str) -> bool;

    fn mark_compatible(&mut self, name: &str);
}

/// Throwaway store that forgets everything at the end of the run.
impl ClassificationStore for HashSet<String> {
    fn is_marked_compatible(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn mark_compatible(&mut self, name: &str) {
        self.insert(name.to_string());
    }
}
