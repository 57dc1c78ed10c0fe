//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`RegistryError::Api`]) so the individual clients
//! stay focused on request construction and response mapping.

use reqwest::StatusCode;
use reqwest::blocking::Response;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::RegistryError;

/// Fallback wait when `Retry-After` is absent or unparseable.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. No retry is attempted; the
/// caller decides whether the failure is fatal.
pub fn check_response(resp: Response) -> Result<Response, RegistryError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(RegistryError::RateLimited {
            url: resp.url().to_string(),
            retry_after_secs: parse_retry_after(resp.headers()),
        });
    }
    if !status.is_success() {
        let url = resp.url().to_string();
        return Err(RegistryError::Api {
            status: status.as_u16(),
            url,
            message: resp.text().unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds.
fn parse_retry_after(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
