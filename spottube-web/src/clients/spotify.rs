//! Spotify Web API client
//!
//! Read-only access to the signed-in user's playlists: the picker list,
//! a single playlist's name, and its track entries.
//!
//! # API Reference
//! - Base URL: <https://api.spotify.com/v1>
//! - Docs: <https://developer.spotify.com/documentation/web-api>

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use spottube_common::config::PlatformConfig;
use spottube_common::{Platform, Result};
use tracing::debug;

use super::check_status;

/// One playlist in the picker list
#[derive(Debug, Clone)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

/// Title and first listed artist of one playlist track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrack {
    pub title: String,
    pub artist: String,
}

/// One playlist entry; `track` is None when the vendor sent a null
/// track object (removed or unavailable content) or an empty artist list
#[derive(Debug, Clone)]
pub struct PlaylistItem {
    pub track: Option<SourceTrack>,
}

/// Client for the Spotify Web API
pub struct SpotifyClient {
    http_client: Client,
    api_base_url: String,
}

impl SpotifyClient {
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            http_client: super::http_client(),
            api_base_url: config.api_base_url.clone(),
        }
    }

    /// First page of the signed-in user's playlists
    pub async fn current_user_playlists(&self, access_token: &str) -> Result<Vec<PlaylistSummary>> {
        let url = format!("{}/me/playlists", self.api_base_url);
        let page: PlaylistPage = self.get_json(&url, access_token).await?;

        Ok(page
            .items
            .into_iter()
            .map(|playlist| PlaylistSummary {
                id: playlist.id,
                name: playlist.name,
            })
            .collect())
    }

    /// Display name of one playlist, None when the vendor omits it
    pub async fn playlist_name(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> Result<Option<String>> {
        let url = format!("{}/playlists/{}", self.api_base_url, playlist_id);
        let details: PlaylistDetails = self.get_json(&url, access_token).await?;
        Ok(details.name)
    }

    /// Track entries of one playlist, in playlist order
    pub async fn playlist_items(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>> {
        let url = format!("{}/playlists/{}/tracks", self.api_base_url, playlist_id);
        let page: TrackPage = self.get_json(&url, access_token).await?;

        Ok(page
            .items
            .into_iter()
            .map(|item| PlaylistItem {
                track: item.track.and_then(to_source_track),
            })
            .collect())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, access_token: &str) -> Result<T> {
        debug!(url, "Spotify API request");
        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = check_status(Platform::Spotify, response).await?;
        Ok(response.json().await?)
    }
}

/// Title plus first listed artist; None when the artist list is empty
fn to_source_track(track: TrackObject) -> Option<SourceTrack> {
    let artist = track.artists.into_iter().next()?.name;
    Some(SourceTrack {
        title: track.name,
        artist,
    })
}

// ============================================================================
// Spotify API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Vec<PlaylistObject>,
}

#[derive(Debug, Deserialize)]
struct PlaylistObject {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistDetails {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    name: String,
    #[serde(default)]
    artists: Vec<ArtistObject>,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    name: String,
}
