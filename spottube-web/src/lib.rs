//! spottube-web library
//!
//! Web service that converts Spotify playlists into YouTube playlists:
//! - OAuth 2.0 login flows for both platforms
//! - Signed-cookie sessions holding per-platform tokens server-side
//! - Playlist picker and conversion pages
//! - Conversion pipeline (fetch, search, insert)

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use spottube_common::config::Config;
use spottube_common::session::SessionStore;
use tower_http::trace::TraceLayer;

use crate::clients::spotify::SpotifyClient;
use crate::clients::youtube::YouTubeClient;

pub mod api;
pub mod clients;
pub mod convert;
pub mod error;
pub mod oauth;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Merged configuration, read-only after startup
    pub config: Arc<Config>,
    /// Server-side session store (signed cookie ids, per-platform tokens)
    pub sessions: Arc<SessionStore>,
    /// Source-platform Web API client
    pub spotify: Arc<SpotifyClient>,
    /// Destination-platform Web API client
    pub youtube: Arc<YouTubeClient>,
    /// Client for token-endpoint posts (code exchange, refresh)
    pub http: reqwest::Client,
}

impl AppState {
    /// Create application state from loaded configuration
    pub fn new(config: Config) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(config.session_timeout_secs)),
            spotify: Arc::new(SpotifyClient::new(&config.spotify)),
            youtube: Arc::new(YouTubeClient::new(&config.youtube)),
            http: clients::http_client(),
            config: Arc::new(config),
        }
    }
}

/// Build the application router
///
/// Every route runs behind the session middleware except /health, which
/// stays cookie-free for probes.
pub fn build_router(state: AppState) -> Router {
    let session_scoped = Router::new()
        .route("/", get(api::landing_page))
        .route("/login", get(api::spotify_login))
        .route("/callback", get(api::spotify_callback))
        .route("/refresh-token", get(api::spotify_refresh))
        .route("/youtube_login", get(api::youtube_login))
        .route("/youtube_callback", get(api::youtube_callback))
        .route(
            "/playlists",
            get(api::playlists_page).post(api::choose_playlist),
        )
        .route("/convert/:playlist_id", get(api::conversion_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::session_middleware,
        ));

    Router::new()
        .merge(session_scoped)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
