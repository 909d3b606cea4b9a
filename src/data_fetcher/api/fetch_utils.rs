//! Single-attempt HTTP fetching with status mapping and timeout detection

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::AppError;

/// Maps a non-success status to the matching error variant.
pub fn status_error(status: reqwest::StatusCode, url: &str) -> AppError {
    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");

    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

fn transport_error(e: reqwest::Error, url: &str, timeout_seconds: u64) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url, timeout_seconds)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Fetches `url` once and returns the response body as text.
///
/// There is no retry and no cache: a relay gets exactly one attempt.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - Relay URL to fetch
/// * `timeout_seconds` - Budget for the whole request including the body
///
/// # Returns
/// * `Result<String, AppError>` - Body of a 2xx response, or a timeout, connection or status error
#[instrument(skip(client))]
pub(super) async fn fetch_text(
    client: &Client,
    url: &str,
    timeout_seconds: u64,
) -> Result<String, AppError> {
    let response = client
        .get(url)
        .timeout(Duration::from_secs(timeout_seconds))
        .send()
        .await
        .map_err(|e| transport_error(e, url, timeout_seconds))?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        warn!("HTTP {} (URL: {})", status, url);
        return Err(status_error(status, url));
    }

    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, url, timeout_seconds))?;

    debug!("Response length: {} bytes", body.len());
    let preview: String = body.chars().take(200).collect();
    debug!("Response text (first 200 chars): {preview}");

    Ok(body)
}
