//! Error handling for the web service
//!
//! `ApiError` wraps the shared error taxonomy and decides, per variant,
//! whether the browser gets a JSON error body or a redirect into the
//! OAuth flow that can repair the situation.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use spottube_common::{Error as CommonError, Platform};
use thiserror::Error;

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API error type with HTTP response mapping
#[derive(Debug, Error)]
pub enum ApiError {
    /// Source access token expired but a refresh token is stored;
    /// the browser is bounced through the refresh route
    #[error("access token expired, refresh available")]
    RefreshRequired,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Shared error taxonomy, mapped to statuses in `IntoResponse`
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::RefreshRequired => return found("/refresh-token"),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Common(err) => match err {
                // Missing credentials send the browser into the login
                // flow for that platform instead of erroring
                CommonError::NotAuthenticated(Platform::Spotify) => return found("/login"),
                CommonError::NotAuthenticated(Platform::YouTube) => {
                    return found("/youtube_login")
                }
                CommonError::AuthorizationDenied { .. } => (
                    StatusCode::BAD_REQUEST,
                    "AUTHORIZATION_DENIED",
                    err.to_string(),
                ),
                CommonError::MissingAuthorizationCode { .. } => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_AUTHORIZATION_CODE",
                    err.to_string(),
                ),
                CommonError::TokenExchangeFailed { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "TOKEN_EXCHANGE_FAILED",
                    err.to_string(),
                ),
                CommonError::RefreshFailed { .. } => {
                    (StatusCode::BAD_GATEWAY, "REFRESH_FAILED", err.to_string())
                }
                CommonError::VendorApi { .. } => {
                    (StatusCode::BAD_GATEWAY, "VENDOR_ERROR", err.to_string())
                }
                CommonError::Http(_) => (
                    StatusCode::BAD_GATEWAY,
                    "VENDOR_UNREACHABLE",
                    err.to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    err.to_string(),
                ),
            },
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Plain `302 Found` redirect
///
/// `axum::response::Redirect` only offers 303/307/308; the OAuth
/// round-trips here use the classic 302.
pub fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
