//! Manually curated override table.
//!
//! Loaded once at startup from a JSON object mapping package names to
//! [`OverrideEntry`] values; read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use relic_core::OverrideEntry;

use crate::error::CacheError;

/// Entry returned for names excluded by prefix.
static SKIPPED: OverrideEntry = OverrideEntry::Compatible;

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, OverrideEntry>,
    skip_prefixes: Vec<String>,
}

impl OverrideTable {
    /// Load the table from `path`. A missing file yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the file exists but cannot be read or does
    /// not hold a valid override object.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no override file; continuing without overrides");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CacheError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let entries: HashMap<String, OverrideEntry> =
            serde_json::from_str(&raw).map_err(|source| CacheError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), count = entries.len(), "overrides loaded");

        Ok(Self {
            entries,
            skip_prefixes: Vec::new(),
        })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, OverrideEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            skip_prefixes: Vec::new(),
        }
    }

    /// Treat every name starting with one of `prefixes` as `[]`.
    #[must_use]
    pub fn with_skip_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.skip_prefixes = prefixes;
        self
    }

    /// Explicit entry for `name`, else the implicit `[]` for skipped prefixes.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&OverrideEntry> {
        self.entries.get(name).or_else(|| {
            self.skip_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
                .then_some(&SKIPPED)
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
