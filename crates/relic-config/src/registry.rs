//! Endpoints for the registry listing, per-package metadata, and GitHub.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_URL: &str =
    "https://hugovk.github.io/top-pypi-packages/top-pypi-packages-365-days.min.json";
pub const DEFAULT_PYPI_URL: &str = "https://pypi.org/pypi";
pub const DEFAULT_GITHUB_URL: &str = "https://github.com";

fn default_top_url() -> String {
    DEFAULT_TOP_URL.to_string()
}

fn default_pypi_url() -> String {
    DEFAULT_PYPI_URL.to_string()
}

fn default_github_url() -> String {
    DEFAULT_GITHUB_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("relic/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Bulk "top packages by downloads" listing.
    #[serde(default = "default_top_url")]
    pub top_url: String,

    /// Base of the per-package JSON API (`{pypi_url}/{name}/json`).
    #[serde(default = "default_pypi_url")]
    pub pypi_url: String,

    /// Base of repository pages scraped for star counts.
    #[serde(default = "default_github_url")]
    pub github_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            top_url: default_top_url(),
            pypi_url: default_pypi_url(),
            github_url: default_github_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
