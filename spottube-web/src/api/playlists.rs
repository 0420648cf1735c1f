//! Playlist picker page
//!
//! GET renders the signed-in user's playlists as a radio-button form;
//! POST takes the selection and bounces to the conversion route. A POST
//! without a selection re-renders the picker, matching the form's
//! round-trip behavior in the browser.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::{Extension, Form};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::session::{require_spotify_tokens, SessionId};
use crate::api::ui::escape_html;
use crate::error::{found, ApiResult};
use crate::AppState;

/// Form body posted by the playlist picker
#[derive(Debug, Deserialize)]
pub struct ChooseForm {
    playlist_id: Option<String>,
}

/// Render the playlist picker
pub async fn playlists_page(
    State(state): State<AppState>,
    Extension(SessionId(session)): Extension<SessionId>,
) -> ApiResult<Response> {
    render_picker(&state, session).await
}

/// Take the picked playlist and continue to the conversion route
pub async fn choose_playlist(
    State(state): State<AppState>,
    Extension(SessionId(session)): Extension<SessionId>,
    Form(form): Form<ChooseForm>,
) -> ApiResult<Response> {
    match form.playlist_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(found(&format!("/convert/{id}"))),
        _ => render_picker(&state, session).await,
    }
}

async fn render_picker(state: &AppState, session: Uuid) -> ApiResult<Response> {
    let tokens = require_spotify_tokens(state, session).await?;
    let playlists = state
        .spotify
        .current_user_playlists(&tokens.access_token)
        .await?;

    let options: String = playlists
        .iter()
        .map(|playlist| {
            let id = escape_html(&playlist.id);
            let name = escape_html(&playlist.name);
            format!(
                r#"<input type="radio" id="{id}" name="playlist_id" value="{id}"><label for="{id}">{name}</label><br>"#
            )
        })
        .collect();

    let html = format!(
        r#"<html>
    <head><title>Your Playlists</title></head>
    <body>
        <h1>Your Playlists</h1>
        <form method="post">
            {options}
            <br>
            <button type="submit">Convert to YouTube Playlist</button>
        </form>
    </body>
</html>"#
    );

    Ok(Html(html).into_response())
}
