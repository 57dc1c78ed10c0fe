//! # relic-registry
//!
//! Blocking HTTP clients for the three remote data sources the pipeline
//! chains together:
//! - the bulk "top `PyPI` packages by downloads" listing
//! - the `PyPI` per-package JSON API (metadata and trove classifiers)
//! - GitHub repository pages, scraped for their star count
//!
//! Every call blocks the calling thread until it returns. Nothing is
//! retried; the caller decides which failures are fatal.

pub mod github;
pub mod oracle;
pub mod pypi;
pub mod top;

mod error;
mod http;

pub use error::RegistryError;
pub use oracle::TroveOracle;

use std::time::Duration;

/// Remote locations and transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Bulk listing returning `{"rows": [{"project", "download_count"}]}`.
    pub top_url: String,
    /// Base of `{pypi_url}/{name}/json`.
    pub pypi_url: String,
    /// Base of `{github_url}/{owner}/{name}`.
    pub github_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            top_url: "https://hugovk.github.io/top-pypi-packages/top-pypi-packages-365-days.min.json"
                .to_string(),
            pypi_url: "https://pypi.org/pypi".to_string(),
            github_url: "https://github.com".to_string(),
            user_agent: concat!("relic/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Blocking HTTP client shared by the listing, metadata, and star lookups.
pub struct RegistryClient {
    http: reqwest::blocking::Client,
    endpoints: Endpoints,
}

impl RegistryClient {
    /// Build a client for the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying client fails to build.
    pub fn new(endpoints: Endpoints) -> Result<Self, RegistryError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(endpoints.user_agent.clone())
            .timeout(endpoints.timeout)
            .build()?;
        Ok(Self { http, endpoints })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}
