//! Persistent classification cache.
//!
//! Records package names already classified as compatible with the current
//! runtime so later runs skip the oracle and metadata fetch for them. On
//! disk it is a JSON object `{"name": []}`.
//!
//! The cache is a scoped guard: pending writes are flushed on [`close`] or,
//! failing that, when the value is dropped, including during unwinding.
//!
//! [`close`]: ClassificationCache::close

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use relic_core::{ClassificationStore, CoreError};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::CacheError;

/// The empty-array marker meaning "classified compatible".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
struct CompatibleMarker;

impl TryFrom<Vec<String>> for CompatibleMarker {
    type Error = CoreError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Self)
        } else {
            Err(CoreError::InvalidMarker { len: value.len() })
        }
    }
}

impl From<CompatibleMarker> for Vec<String> {
    fn from(_: CompatibleMarker) -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ClassificationCache {
    path: PathBuf,
    entries: BTreeMap<String, CompatibleMarker>,
    dirty: bool,
}

impl ClassificationCache {
    /// Open the cache at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let entries: BTreeMap<String, CompatibleMarker> = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| CacheError::Json {
                path: path.clone(),
                source,
            })?,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(CacheError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), count = entries.len(), "classification cache opened");

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Record `name` as compatible. Returns `false` if it was already cached.
    pub fn insert(&mut self, name: &str) -> bool {
        let added = self
            .entries
            .insert(name.to_string(), CompatibleMarker)
            .is_none();
        self.dirty |= added;
        added
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write pending entries atomically (temp file + rename).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the file cannot be written or replaced.
    pub fn flush(&mut self) -> Result<(), CacheError> {
        if !self.dirty {
            return Ok(());
        }

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;

        let mut file = NamedTempFile::new_in(dir).map_err(|source| self.io_error(source))?;
        serde_json::to_writer(&mut file, &self.entries).map_err(|source| CacheError::Json {
            path: self.path.clone(),
            source,
        })?;
        file.flush().map_err(|source| self.io_error(source))?;
        // Temp files are created 0600; keep whatever mode the cache already had.
        if let Ok(existing) = std::fs::metadata(&self.path) {
            file.as_file()
                .set_permissions(existing.permissions())
                .map_err(|source| self.io_error(source))?;
        }
        file.persist(&self.path)
            .map_err(|source| CacheError::Persist {
                path: self.path.clone(),
                source,
            })?;

        self.dirty = false;
        tracing::debug!(path = %self.path.display(), count = self.entries.len(), "classification cache flushed");
        Ok(())
    }

    /// Flush and release the cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the final flush fails.
    pub fn close(mut self) -> Result<(), CacheError> {
        self.flush()
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ClassificationStore for ClassificationCache {
    fn is_marked_compatible(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn mark_compatible(&mut self, name: &str) {
        self.insert(name);
    }
}

impl Drop for ClassificationCache {
    fn drop(&mut self) {
        if let Err(error) = self.flush() {
            tracing::error!(%error, "failed to flush classification cache");
        }
    }
}
