//! Conversion route
//!
//! Runs one playlist conversion end to end and renders the result page
//! with the new playlist's id and any tracks that had no video match.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;

use crate::api::session::{require_spotify_tokens, require_youtube_tokens, SessionId};
use crate::api::ui::escape_html;
use crate::convert::{self, ConversionReport};
use crate::error::ApiResult;
use crate::AppState;

/// Convert the named Spotify playlist and show the outcome
///
/// Both platforms' tokens are checked before any vendor call is made;
/// a missing or unusable one redirects into the flow that repairs it.
pub async fn conversion_page(
    State(state): State<AppState>,
    Extension(SessionId(session)): Extension<SessionId>,
    Path(playlist_id): Path<String>,
) -> ApiResult<Response> {
    let spotify_tokens = require_spotify_tokens(&state, session).await?;
    let youtube_tokens = require_youtube_tokens(&state, session).await?;

    let report = convert::convert_playlist(
        &state.spotify,
        &state.youtube,
        &spotify_tokens.access_token,
        &youtube_tokens.access_token,
        &playlist_id,
    )
    .await?;

    Ok(result_page(&report))
}

/// Result page listing the created playlist and any unmatched tracks
fn result_page(report: &ConversionReport) -> Response {
    let playlist_id = escape_html(&report.playlist_id);
    let not_found_report = if report.not_found.is_empty() {
        "None".to_string()
    } else {
        report
            .not_found
            .iter()
            .map(|entry| escape_html(entry))
            .collect::<Vec<_>>()
            .join("<br>")
    };

    let html = format!(
        r#"<html>
    <body>
        <h1>Playlist Created!</h1>
        <p>Playlist ID: {playlist_id}</p>
        <h2>Some songs were not found on YouTube:</h2>
        <p>{not_found_report}</p>
        <p><a href="https://www.youtube.com/playlist?list={playlist_id}">View Playlist on YouTube</a></p>
    </body>
</html>"#
    );

    Html(html).into_response()
}
