//! Vendor REST clients
//!
//! One client per platform Web API. Both are thin: Bearer-auth requests
//! against a configurable base URL, with non-success statuses surfaced
//! as `VendorApi` errors carrying the response body.

pub mod spotify;
pub mod youtube;

use std::time::Duration;

use reqwest::{Client, Response};
use spottube_common::{Error, Platform, Result};

/// Timeout applied to every outbound vendor request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// reqwest client with the standard vendor-call timeout
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Pass a successful response through, or consume the body into a
/// `VendorApi` error
pub(crate) async fn check_status(platform: Platform, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::VendorApi {
        platform,
        status: status.as_u16(),
        detail: body,
    })
}
