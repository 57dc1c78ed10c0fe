//! `PyPI` per-package metadata client.
//!
//! Direct lookup via `{pypi_url}/{name}/json`. The response carries the
//! project's home page, long description, trove classifiers, and every
//! release artifact with its runtime tag.

use relic_core::{MetadataSource, RegistryMetadata};

use crate::{RegistryClient, error::RegistryError, http::check_response};

impl RegistryClient {
    /// Fetch metadata for a single package.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the HTTP request fails, the registry
    /// returns a non-success status (including 404), or the body cannot be
    /// parsed.
    pub fn package_metadata(&self, name: &str) -> Result<RegistryMetadata, RegistryError> {
        let url = metadata_url(&self.endpoints.pypi_url, name);
        tracing::debug!(package = name, %url, "fetching package metadata");

        let resp = check_response(self.http.get(&url).send()?)?;
        resp.json::<RegistryMetadata>()
            .map_err(|e| RegistryError::Parse(format!("metadata for {name}: {e}")))
    }
}

impl MetadataSource for RegistryClient {
    type Error = RegistryError;

    fn fetch_metadata(&self, name: &str) -> Result<RegistryMetadata, Self::Error> {
        self.package_metadata(name)
    }
}

fn metadata_url(base: &str, name: &str) -> String {
    format!(
        "{}/{}/json",
        base.trim_end_matches('/'),
        urlencoding::encode(name)
    )
}
