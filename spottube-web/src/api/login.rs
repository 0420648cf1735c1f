//! OAuth login, callback, and refresh routes
//!
//! `/login` and `/youtube_login` bounce the browser to the platform's
//! consent page; `/callback` and `/youtube_callback` complete the code
//! exchange and store the session tokens; `/refresh-token` renews an
//! expired Spotify access token.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Extension;
use serde::Deserialize;
use spottube_common::{Error, Platform};
use tracing::info;

use crate::api::session::SessionId;
use crate::error::{found, ApiError, ApiResult};
use crate::{oauth, AppState};

/// Query parameters a consent page sends back to a callback route
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
}

impl CallbackQuery {
    /// The authorization code, or the failure this callback represents
    ///
    /// An `error` parameter wins over a `code` parameter; neither being
    /// present is its own failure.
    fn code(&self, platform: Platform) -> Result<&str, Error> {
        if let Some(reason) = &self.error {
            return Err(Error::AuthorizationDenied {
                platform,
                reason: reason.clone(),
            });
        }
        self.code
            .as_deref()
            .ok_or(Error::MissingAuthorizationCode { platform })
    }
}

/// Send the browser to the Spotify consent page
pub async fn spotify_login(State(state): State<AppState>) -> ApiResult<Response> {
    let url = oauth::consent_url(Platform::Spotify, &state.config.spotify)?;
    Ok(found(&url))
}

/// Complete the Spotify authorization and store the session tokens
pub async fn spotify_callback(
    State(state): State<AppState>,
    Extension(SessionId(session)): Extension<SessionId>,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<Response> {
    let code = query.code(Platform::Spotify)?;
    let tokens =
        oauth::exchange_code(&state.http, Platform::Spotify, &state.config.spotify, code).await?;

    if !state
        .sessions
        .set_tokens(session, Platform::Spotify, tokens)
        .await
    {
        return Err(ApiError::Internal(
            "session expired during login".to_string(),
        ));
    }

    info!("Spotify authorization complete");
    Ok(found("/playlists"))
}

/// Refresh the Spotify access token, then continue to the playlists page
///
/// A still-valid token is left alone; the redirect is the same either
/// way, so a stale browser tab landing here does no harm.
pub async fn spotify_refresh(
    State(state): State<AppState>,
    Extension(SessionId(session)): Extension<SessionId>,
) -> ApiResult<Response> {
    let tokens = state
        .sessions
        .tokens(session, Platform::Spotify)
        .await
        .ok_or(Error::NotAuthenticated(Platform::Spotify))?;

    if tokens.refresh_token.is_none() {
        return Err(Error::NotAuthenticated(Platform::Spotify).into());
    }

    if tokens.is_expired() {
        let refreshed = oauth::refresh_tokens(
            &state.http,
            Platform::Spotify,
            &state.config.spotify,
            &tokens,
        )
        .await?;

        if !state
            .sessions
            .set_tokens(session, Platform::Spotify, refreshed)
            .await
        {
            return Err(ApiError::Internal(
                "session expired during token refresh".to_string(),
            ));
        }
        info!("Spotify access token refreshed");
    }

    Ok(found("/playlists"))
}

/// Send the browser to the YouTube consent page
pub async fn youtube_login(State(state): State<AppState>) -> ApiResult<Response> {
    let url = oauth::consent_url(Platform::YouTube, &state.config.youtube)?;
    Ok(found(&url))
}

/// Complete the YouTube authorization and store the session tokens
pub async fn youtube_callback(
    State(state): State<AppState>,
    Extension(SessionId(session)): Extension<SessionId>,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<Response> {
    let code = query.code(Platform::YouTube)?;
    let tokens =
        oauth::exchange_code(&state.http, Platform::YouTube, &state.config.youtube, code).await?;

    // YouTube sessions must be refreshable; an exchange that omits the
    // refresh token fails before anything is stored
    if tokens.refresh_token.is_none() {
        return Err(Error::TokenExchangeFailed {
            platform: Platform::YouTube,
            detail: "response did not include a refresh token".to_string(),
        }
        .into());
    }

    if !state
        .sessions
        .set_tokens(session, Platform::YouTube, tokens)
        .await
    {
        return Err(ApiError::Internal(
            "session expired during login".to_string(),
        ));
    }

    info!("YouTube authorization complete");
    Ok(found("/playlists"))
}
