//! Playlist conversion pipeline
//!
//! Fetches the source playlist from Spotify, creates the destination
//! playlist on YouTube, then resolves each track to a video and appends
//! the matches. Searches overlap up to a small concurrency bound while
//! the inserts stay strictly sequential, so the destination playlist
//! keeps the source ordering.

use futures::stream::{self, StreamExt};
use spottube_common::Result;
use tracing::{info, warn};

use crate::clients::spotify::{SourceTrack, SpotifyClient};
use crate::clients::youtube::YouTubeClient;

/// Upper bound on entries taken from the source playlist
pub const MAX_TRACKS: usize = 30;

/// Video searches allowed in flight at once
const SEARCH_CONCURRENCY: usize = 4;

/// Source-playlist name used when the vendor omits one
const FALLBACK_PLAYLIST_NAME: &str = "Converted Playlist";

/// Description given to every destination playlist
const PLAYLIST_DESCRIPTION: &str = "Playlist converted from Spotify";

/// Outcome of one conversion, rendered by the result page
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Id of the playlist created on YouTube
    pub playlist_id: String,
    /// Tracks without a search match, as `"{title} by {artist}"`,
    /// in source order
    pub not_found: Vec<String>,
}

/// Convert one Spotify playlist into a new private YouTube playlist
pub async fn convert_playlist(
    spotify: &SpotifyClient,
    youtube: &YouTubeClient,
    spotify_token: &str,
    youtube_token: &str,
    playlist_id: &str,
) -> Result<ConversionReport> {
    let name = spotify
        .playlist_name(spotify_token, playlist_id)
        .await?
        .unwrap_or_else(|| FALLBACK_PLAYLIST_NAME.to_string());

    let mut items = spotify.playlist_items(spotify_token, playlist_id).await?;
    if items.len() > MAX_TRACKS {
        info!(
            total = items.len(),
            kept = MAX_TRACKS,
            "source playlist exceeds the conversion cap, extra entries dropped"
        );
        items.truncate(MAX_TRACKS);
    }

    let mut tracks = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item.track {
            Some(track) => tracks.push(track),
            None => warn!(index, "skipping playlist entry without usable track data"),
        }
    }

    let title = format!("Converted from Spotify: {name}");
    let destination_id = youtube
        .create_playlist(youtube_token, &title, PLAYLIST_DESCRIPTION)
        .await?;
    info!(
        playlist_id = %destination_id,
        title = %title,
        tracks = tracks.len(),
        "destination playlist created"
    );

    // Searches run up to SEARCH_CONCURRENCY deep and resolve in source
    // order; each hit is inserted before the next resolution is taken,
    // and the first insert failure drops the in-flight searches
    let mut resolutions = stream::iter(tracks)
        .map(|track| async move {
            let query = search_query(&track);
            let found = youtube.search_top_video(youtube_token, &query).await;
            (track, found)
        })
        .buffered(SEARCH_CONCURRENCY);

    let mut added = 0usize;
    let mut not_found = Vec::new();
    while let Some((track, found)) = resolutions.next().await {
        match found? {
            Some(video_id) => {
                youtube
                    .add_video(youtube_token, &destination_id, &video_id)
                    .await?;
                added += 1;
            }
            None => {
                warn!(title = %track.title, artist = %track.artist, "no video match");
                not_found.push(format!("{} by {}", track.title, track.artist));
            }
        }
    }

    info!(
        playlist_id = %destination_id,
        added,
        missing = not_found.len(),
        "conversion complete"
    );

    Ok(ConversionReport {
        playlist_id: destination_id,
        not_found,
    })
}

/// Free-text query sent to the video search endpoint
fn search_query(track: &SourceTrack) -> String {
    format!("{} {}", track.title, track.artist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_title_then_artist() {
        let track = SourceTrack {
            title: "Bohemian Rhapsody".to_string(),
            artist: "Queen".to_string(),
        };
        assert_eq!(search_query(&track), "Bohemian Rhapsody Queen");
    }
}
