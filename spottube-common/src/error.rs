//! Common error types for SpotTube

use thiserror::Error;

use crate::Platform;

/// Common result type for SpotTube operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the SpotTube services
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The vendor consent page redirected back with an error
    /// (user denied access, bad client configuration, ...)
    #[error("{platform} authorization failed: {reason}")]
    AuthorizationDenied { platform: Platform, reason: String },

    /// Callback request carried neither a code nor an error parameter
    #[error("{platform} callback did not include an authorization code")]
    MissingAuthorizationCode { platform: Platform },

    /// Token endpoint rejected the authorization code or returned
    /// an unusable body
    #[error("{platform} token exchange failed: {detail}")]
    TokenExchangeFailed { platform: Platform, detail: String },

    /// Token endpoint rejected a refresh attempt
    #[error("{platform} token refresh failed: {detail}")]
    RefreshFailed { platform: Platform, detail: String },

    /// Vendor Web API returned a non-success status
    #[error("{platform} API returned {status}: {detail}")]
    VendorApi {
        platform: Platform,
        status: u16,
        detail: String,
    },

    /// No usable tokens stored for this platform in the current session
    #[error("Not authenticated with {0}")]
    NotAuthenticated(Platform),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
