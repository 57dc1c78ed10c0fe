//! General run configuration: result size and file locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of packages in the ranking.
const fn default_num_packages() -> usize {
    100
}

fn default_outfile() -> PathBuf {
    PathBuf::from("result.json")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("cache.json")
}

fn default_overrides_path() -> PathBuf {
    PathBuf::from("overrides.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Maximum number of packages to list.
    #[serde(default = "default_num_packages")]
    pub num_packages: usize,

    /// Where the JSON ranking is written.
    #[serde(default = "default_outfile")]
    pub outfile: PathBuf,

    /// Persistent classification cache file.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Manually curated overrides (`name -> [] | [owner, name, url]`).
    #[serde(default = "default_overrides_path")]
    pub overrides_path: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            num_packages: default_num_packages(),
            outfile: default_outfile(),
            cache_path: default_cache_path(),
            overrides_path: default_overrides_path(),
        }
    }
}
