//! Bulk "top packages by downloads" listing.
//!
//! The listing is a single JSON document ordered by descending download
//! count. It is the only data source the pipeline cannot run without, so
//! every failure here is surfaced to the caller.

use relic_core::PackageCandidate;
use serde::Deserialize;

use crate::{RegistryClient, error::RegistryError, http::check_response};

#[derive(Deserialize)]
struct TopListing {
    rows: Vec<TopRow>,
}

#[derive(Debug, Deserialize)]
struct TopRow {
    project: String,
    download_count: u64,
}

impl From<TopRow> for PackageCandidate {
    fn from(row: TopRow) -> Self {
        Self::new(row.project, row.download_count)
    }
}

impl RegistryClient {
    /// Fetch the listing and yield candidates in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the request fails, the remote answers
    /// with a non-success status, or the body is not a valid listing.
    pub fn top_packages(
        &self,
    ) -> Result<impl Iterator<Item = PackageCandidate> + use<>, RegistryError> {
        let url = &self.endpoints.top_url;
        tracing::debug!(url, "fetching top package listing");

        let resp = check_response(self.http.get(url).send()?)?;
        let rows = parse_listing(&resp.text()?)?;
        tracing::info!(count = rows.len(), "top package listing fetched");

        Ok(rows.into_iter().map(PackageCandidate::from))
    }
}

fn parse_listing(body: &str) -> Result<Vec<TopRow>, RegistryError> {
    serde_json::from_str::<TopListing>(body)
        .map(|listing| listing.rows)
        .map_err(|e| RegistryError::Parse(format!("top package listing: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "last_update": "2026-10-01 12:00:00",
        "rows": [
            {"download_count": 2000, "project": "baz"},
            {"download_count": 1000, "project": "foo"},
            {"download_count": 500, "project": "bar"}
        ]
    }"#;

    #[test]
    fn listing_keeps_order() {
        let candidates: Vec<PackageCandidate> = parse_listing(FIXTURE)
            .unwrap()
            .into_iter()
            .map(PackageCandidate::from)
            .collect();

        assert_eq!(
            candidates,
            vec![
                PackageCandidate::new("baz", 2000),
                PackageCandidate::new("foo", 1000),
                PackageCandidate::new("bar", 500),
            ]
        );
    }

    #[test]
    fn malformed_listing_is_a_parse_error() {
        let err = parse_listing(r#"{"packages": []}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    #[ignore] // requires network
    fn live_top_packages() {
        let client = RegistryClient::new(crate::Endpoints::default()).unwrap();
        let first: Vec<_> = client.top_packages().unwrap().take(5).collect();
        assert_eq!(first.len(), 5);
        for pkg in &first {
            println!("{:>12} {}", pkg.downloads, pkg.name);
        }
    }
}
