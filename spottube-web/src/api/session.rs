//! Session middleware and per-platform token guards
//!
//! Every page route runs behind `session_middleware`: it verifies the
//! signed session cookie, creates a fresh session when the cookie is
//! missing or rejected, and attaches the session id to the request.
//! Handlers then use the guards to turn stored tokens into usable ones
//! or into the redirect that repairs the session.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use spottube_common::session::PlatformTokens;
use spottube_common::{Error, Platform};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::{oauth, AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "spottube_sid";

/// Session id attached to every request by the middleware
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

/// Resolve or create the session for this request
///
/// A tampered or expired cookie is treated the same as no cookie at
/// all: the request proceeds with a brand-new empty session and the
/// response carries the replacement Set-Cookie.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let presented = session_cookie(request.headers()).map(str::to_owned);
    if let Some(value) = presented {
        if let Some(id) = state.sessions.verify_cookie(&value).await {
            request.extensions_mut().insert(SessionId(id));
            return next.run(request).await;
        }
        debug!("session cookie rejected, issuing a new session");
    }

    let (id, cookie) = state.sessions.create().await;
    request.extensions_mut().insert(SessionId(id));
    let mut response = next.run(request).await;

    let set_cookie = format!("{SESSION_COOKIE}={cookie}; Path=/; HttpOnly; SameSite=Lax");
    match HeaderValue::from_str(&set_cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => error!(error = %e, "failed to encode session cookie header"),
    }

    response
}

/// Usable Spotify tokens for this session
///
/// Missing tokens, or expired ones without a refresh token, bounce the
/// browser into the login flow; expired tokens with a refresh token
/// bounce through the refresh route instead.
pub async fn require_spotify_tokens(state: &AppState, session: Uuid) -> ApiResult<PlatformTokens> {
    let tokens = state
        .sessions
        .tokens(session, Platform::Spotify)
        .await
        .ok_or(Error::NotAuthenticated(Platform::Spotify))?;

    if tokens.is_expired() {
        if tokens.refresh_token.is_some() {
            return Err(ApiError::RefreshRequired);
        }
        return Err(Error::NotAuthenticated(Platform::Spotify).into());
    }

    Ok(tokens)
}

/// Usable YouTube tokens for this session, refreshing inline when the
/// access token has expired
///
/// Missing tokens, a missing refresh token, or a failed refresh all
/// send the browser back through YouTube consent.
pub async fn require_youtube_tokens(state: &AppState, session: Uuid) -> ApiResult<PlatformTokens> {
    let tokens = state
        .sessions
        .tokens(session, Platform::YouTube)
        .await
        .ok_or(Error::NotAuthenticated(Platform::YouTube))?;

    if !tokens.is_expired() {
        return Ok(tokens);
    }
    if tokens.refresh_token.is_none() {
        return Err(Error::NotAuthenticated(Platform::YouTube).into());
    }

    let refreshed = match oauth::refresh_tokens(
        &state.http,
        Platform::YouTube,
        &state.config.youtube,
        &tokens,
    )
    .await
    {
        Ok(refreshed) => refreshed,
        Err(e) => {
            warn!(error = %e, "YouTube refresh failed, sending the user back through consent");
            return Err(Error::NotAuthenticated(Platform::YouTube).into());
        }
    };

    if !state
        .sessions
        .set_tokens(session, Platform::YouTube, refreshed.clone())
        .await
    {
        return Err(ApiError::Internal(
            "session expired during token refresh".to_string(),
        ));
    }

    Ok(refreshed)
}

/// Value of the session cookie in the Cookie header, if any
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_no_cookie_header_means_no_session() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_is_found_among_others() {
        let headers = headers_with_cookie("theme=dark; spottube_sid=abc.def; lang=en");
        assert_eq!(session_cookie(&headers), Some("abc.def"));
    }

    #[test]
    fn test_other_cookie_names_do_not_match() {
        let headers = headers_with_cookie("xspottube_sid=abc.def");
        assert_eq!(session_cookie(&headers), None);
    }
}
