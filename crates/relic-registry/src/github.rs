//! GitHub star counts, scraped from the public repository page.
//!
//! The count is read from the anchor linking to `/{owner}/{name}/stargazers`.
//! The anchor's `title` (exact, comma-separated) is preferred over its text,
//! which GitHub abbreviates for large counts (`52.1k`).

use std::sync::LazyLock;

use relic_core::StarSource;
use scraper::{ElementRef, Html, Selector};

use crate::{RegistryClient, error::RegistryError, http::check_response};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector parses"));

static TITLED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[title]").expect("static selector parses"));

impl RegistryClient {
    /// Fetch `owner/name`'s page and read its star count.
    ///
    /// Returns `Ok(None)` when the page loads but carries no count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the request fails or the page answers
    /// with a non-success status.
    pub fn star_count(&self, owner: &str, name: &str) -> Result<Option<u64>, RegistryError> {
        let url = format!(
            "{}/{owner}/{name}",
            self.endpoints.github_url.trim_end_matches('/')
        );
        tracing::debug!(%url, "fetching repository page");

        let resp = check_response(self.http.get(&url).send()?)?;
        Ok(parse_star_count(&resp.text()?, owner, name))
    }
}

impl StarSource for RegistryClient {
    fn fetch_star_count(&self, owner: &str, name: &str) -> Option<u64> {
        match self.star_count(owner, name) {
            Ok(Some(stars)) => Some(stars),
            Ok(None) => {
                tracing::warn!(owner, name, "cannot find stars");
                None
            }
            Err(error) => {
                tracing::warn!(owner, name, %error, "cannot fetch repository page");
                None
            }
        }
    }
}

/// Extract the stargazer count for exactly `owner/name` from a repository page.
#[must_use]
pub fn parse_star_count(html: &str, owner: &str, name: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    let target = format!("/{owner}/{name}/stargazers").to_ascii_lowercase();

    document
        .select(&ANCHOR_SELECTOR)
        .filter(|anchor| {
            anchor
                .value()
                .attr("href")
                .is_some_and(|href| links_to(href, &target))
        })
        .find_map(anchor_count)
}

fn links_to(href: &str, target: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.to_ascii_lowercase().ends_with(target)
}

fn anchor_count(anchor: ElementRef<'_>) -> Option<u64> {
    anchor
        .select(&TITLED_SELECTOR)
        .find_map(|el| el.value().attr("title").and_then(parse_count))
        .or_else(|| {
            let text: String = anchor.text().collect();
            text.split_whitespace().find_map(parse_count)
        })
}

/// Parse a displayed count: `1,234`, `987`, `52.1k`, `1.2m`.
#[must_use]
pub fn parse_count(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let (digits, multiplier) = match cleaned.chars().last()? {
        'k' | 'K' => (&cleaned[..cleaned.len() - 1], 1_000),
        'm' | 'M' => (&cleaned[..cleaned.len() - 1], 1_000_000),
        _ => (cleaned.as_str(), 1),
    };

    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if multiplier == 1 {
        return digits.parse().ok();
    }

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let mut value = whole.parse::<u64>().ok()?.checked_mul(multiplier)?;
    let mut scale = multiplier / 10;
    for digit in fraction.chars() {
        value = value.checked_add(u64::from(digit.to_digit(10)?) * scale)?;
        scale /= 10;
    }
    Some(value)
}
