//! YouTube Data API client
//!
//! Video search for track resolution, plus creation of the destination
//! playlist and insertion of its items.
//!
//! # API Reference
//! - Base URL: <https://www.googleapis.com/youtube/v3>
//! - Docs: <https://developers.google.com/youtube/v3/docs>

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use spottube_common::config::PlatformConfig;
use spottube_common::{Platform, Result};
use tracing::debug;

use super::check_status;

/// Client for the YouTube Data API
pub struct YouTubeClient {
    http_client: Client,
    api_base_url: String,
}

impl YouTubeClient {
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            http_client: super::http_client(),
            api_base_url: config.api_base_url.clone(),
        }
    }

    /// Top video match for a free-text query, None when the result set
    /// is empty
    pub async fn search_top_video(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Option<String>> {
        let url = format!("{}/search", self.api_base_url);
        debug!(query, "YouTube video search");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", "1"),
            ])
            .send()
            .await?;

        let response = check_status(Platform::YouTube, response).await?;
        let page: SearchPage = response.json().await?;

        Ok(page.items.into_iter().next().and_then(|result| {
            let title = result.snippet.map(|snippet| snippet.title);
            let video_id = result.id.video_id;
            if let Some(id) = &video_id {
                debug!(video_id = %id, title = ?title, "video search hit");
            }
            video_id
        }))
    }

    /// Create a private playlist, returning its id
    pub async fn create_playlist(
        &self,
        access_token: &str,
        title: &str,
        description: &str,
    ) -> Result<String> {
        let url = format!("{}/playlists", self.api_base_url);
        debug!(title, "creating YouTube playlist");

        let body = json!({
            "snippet": {
                "title": title,
                "description": description,
            },
            "status": {
                "privacyStatus": "private",
            }
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .query(&[("part", "snippet,status")])
            .json(&body)
            .send()
            .await?;

        let response = check_status(Platform::YouTube, response).await?;
        let created: CreatedPlaylist = response.json().await?;
        Ok(created.id)
    }

    /// Append one video to the end of a playlist
    pub async fn add_video(
        &self,
        access_token: &str,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<()> {
        let url = format!("{}/playlistItems", self.api_base_url);

        let body = json!({
            "snippet": {
                "playlistId": playlist_id,
                "resourceId": {
                    "kind": "youtube#video",
                    "videoId": video_id,
                }
            }
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .query(&[("part", "snippet")])
            .json(&body)
            .send()
            .await?;

        // The created playlist item in the body is not used
        check_status(Platform::YouTube, response).await?;
        Ok(())
    }
}

// ============================================================================
// YouTube API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: SearchResultId,
    #[serde(default)]
    snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchResultId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedPlaylist {
    id: String,
}
