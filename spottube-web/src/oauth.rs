//! OAuth 2.0 authorization-code flow shared by both platforms
//!
//! Builds the consent-page URL and talks to the token endpoint for the
//! two grants this service uses: exchanging a fresh authorization code
//! and refreshing an expired access token. Platform differences are
//! limited to extra consent-URL parameters.

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use spottube_common::config::PlatformConfig;
use spottube_common::session::PlatformTokens;
use spottube_common::{Error, Platform, Result};
use tracing::{debug, info};

/// Build the consent-page URL the browser is redirected to
pub fn consent_url(platform: Platform, config: &PlatformConfig) -> Result<String> {
    let mut url = Url::parse(&config.auth_url)
        .map_err(|e| Error::Config(format!("invalid {platform} auth URL: {e}")))?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", &config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("scope", &config.scope);

        match platform {
            // Always re-show the account dialog so users can switch accounts
            Platform::Spotify => {
                query.append_pair("show_dialog", "true");
            }
            // Offline access with forced consent, so Google issues a
            // refresh token on every authorization rather than only the
            // first one per account
            Platform::YouTube => {
                query
                    .append_pair("access_type", "offline")
                    .append_pair("prompt", "consent");
            }
        }
    }

    Ok(url.into())
}

/// Exchange an authorization code for tokens
pub async fn exchange_code(
    http: &Client,
    platform: Platform,
    config: &PlatformConfig,
    code: &str,
) -> Result<PlatformTokens> {
    debug!(%platform, "exchanging authorization code");
    let response = http
        .post(&config.token_url)
        .form(&[
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::TokenExchangeFailed {
            platform,
            detail: format!("{status}: {body}"),
        });
    }

    let tokens: TokenResponse =
        response
            .json()
            .await
            .map_err(|e| Error::TokenExchangeFailed {
                platform,
                detail: format!("unusable token response: {e}"),
            })?;

    info!(%platform, "authorization code exchanged");
    Ok(tokens.into_platform_tokens(None))
}

/// Refresh an expired access token
///
/// The stored refresh token is kept when the endpoint does not send a
/// replacement (Spotify usually does not, Google sometimes does).
pub async fn refresh_tokens(
    http: &Client,
    platform: Platform,
    config: &PlatformConfig,
    current: &PlatformTokens,
) -> Result<PlatformTokens> {
    let refresh_token = current
        .refresh_token
        .as_deref()
        .ok_or_else(|| Error::RefreshFailed {
            platform,
            detail: "no refresh token stored".to_string(),
        })?;

    debug!(%platform, "refreshing access token");
    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::RefreshFailed {
            platform,
            detail: format!("{status}: {body}"),
        });
    }

    let tokens: TokenResponse = response.json().await.map_err(|e| Error::RefreshFailed {
        platform,
        detail: format!("unusable token response: {e}"),
    })?;

    info!(%platform, "access token refreshed");
    Ok(tokens.into_platform_tokens(current.refresh_token.clone()))
}

// ============================================================================
// Token Endpoint Response Types
// ============================================================================

/// Token endpoint response body; the code-exchange and refresh grants
/// share this shape
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

impl TokenResponse {
    /// Convert to stored tokens, computing the absolute expiry and
    /// falling back to `previous_refresh` when no replacement refresh
    /// token came back
    fn into_platform_tokens(self, previous_refresh: Option<String>) -> PlatformTokens {
        PlatformTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at: Utc::now().timestamp() + self.expires_in,
        }
    }
}
