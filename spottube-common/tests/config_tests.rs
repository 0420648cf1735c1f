//! Tests for configuration loading and priority order
//!
//! Covers:
//! - Environment-only loading with compiled endpoint defaults
//! - TOML file loading
//! - Environment variables overriding file values
//! - Missing credentials rejected with a useful message
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Every test that reads or writes SPOTTUBE_* variables is marked with
//! #[serial] so they run sequentially, not in parallel.

use serial_test::serial;
use spottube_common::config::{Config, DEFAULT_SESSION_TIMEOUT_SECS};
use std::env;

/// Every variable Config::load consults
const ENV_VARS: &[&str] = &[
    "SPOTTUBE_SESSION_TIMEOUT_SECS",
    "SPOTTUBE_SPOTIFY_CLIENT_ID",
    "SPOTTUBE_SPOTIFY_CLIENT_SECRET",
    "SPOTTUBE_SPOTIFY_REDIRECT_URI",
    "SPOTTUBE_SPOTIFY_AUTH_URL",
    "SPOTTUBE_SPOTIFY_TOKEN_URL",
    "SPOTTUBE_SPOTIFY_API_BASE_URL",
    "SPOTTUBE_SPOTIFY_SCOPE",
    "SPOTTUBE_YOUTUBE_CLIENT_ID",
    "SPOTTUBE_YOUTUBE_CLIENT_SECRET",
    "SPOTTUBE_YOUTUBE_REDIRECT_URI",
    "SPOTTUBE_YOUTUBE_AUTH_URL",
    "SPOTTUBE_YOUTUBE_TOKEN_URL",
    "SPOTTUBE_YOUTUBE_API_BASE_URL",
    "SPOTTUBE_YOUTUBE_SCOPE",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

/// Set the six variables that have no compiled default
fn set_required_env() {
    env::set_var("SPOTTUBE_SPOTIFY_CLIENT_ID", "spotify-id");
    env::set_var("SPOTTUBE_SPOTIFY_CLIENT_SECRET", "spotify-secret");
    env::set_var(
        "SPOTTUBE_SPOTIFY_REDIRECT_URI",
        "http://localhost:8888/callback",
    );
    env::set_var("SPOTTUBE_YOUTUBE_CLIENT_ID", "youtube-id");
    env::set_var("SPOTTUBE_YOUTUBE_CLIENT_SECRET", "youtube-secret");
    env::set_var(
        "SPOTTUBE_YOUTUBE_REDIRECT_URI",
        "http://localhost:8888/youtube_callback",
    );
}

#[test]
#[serial]
fn test_missing_credentials_rejected() {
    clear_env();

    let result = Config::from_env();

    assert!(result.is_err());
    // The message names the first missing variable
    let message = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(
        message.contains("SPOTTUBE_SPOTIFY_CLIENT_ID"),
        "unexpected message: {message}"
    );
}

#[test]
#[serial]
fn test_env_only_with_endpoint_defaults() {
    clear_env();
    set_required_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.spotify.client_id, "spotify-id");
    assert_eq!(config.spotify.client_secret, "spotify-secret");
    assert_eq!(config.spotify.redirect_uri, "http://localhost:8888/callback");
    assert_eq!(config.youtube.client_id, "youtube-id");

    // Endpoints and scopes come from compiled defaults
    assert_eq!(config.spotify.auth_url, "https://accounts.spotify.com/authorize");
    assert_eq!(config.spotify.token_url, "https://accounts.spotify.com/api/token");
    assert_eq!(config.spotify.api_base_url, "https://api.spotify.com/v1");
    assert_eq!(config.youtube.auth_url, "https://accounts.google.com/o/oauth2/v2/auth");
    assert_eq!(config.youtube.token_url, "https://oauth2.googleapis.com/token");
    assert_eq!(config.youtube.api_base_url, "https://www.googleapis.com/youtube/v3");
    assert!(config.youtube.scope.contains("youtube"));

    assert_eq!(config.session_timeout_secs, DEFAULT_SESSION_TIMEOUT_SECS);

    clear_env();
}

#[test]
#[serial]
fn test_env_overrides_endpoint_defaults() {
    clear_env();
    set_required_env();
    env::set_var("SPOTTUBE_SPOTIFY_AUTH_URL", "http://localhost:9000/authorize");
    env::set_var("SPOTTUBE_SPOTIFY_API_BASE_URL", "http://localhost:9000/v1");
    env::set_var("SPOTTUBE_SESSION_TIMEOUT_SECS", "600");

    let config = Config::from_env().unwrap();

    assert_eq!(config.spotify.auth_url, "http://localhost:9000/authorize");
    assert_eq!(config.spotify.api_base_url, "http://localhost:9000/v1");
    assert_eq!(config.session_timeout_secs, 600);
    // Untouched settings keep their defaults
    assert_eq!(config.spotify.token_url, "https://accounts.spotify.com/api/token");

    clear_env();
}

#[test]
#[serial]
fn test_api_base_url_trailing_slash_stripped() {
    clear_env();
    set_required_env();
    env::set_var("SPOTTUBE_SPOTIFY_API_BASE_URL", "http://localhost:9000/v1/");

    let config = Config::from_env().unwrap();
    assert_eq!(config.spotify.api_base_url, "http://localhost:9000/v1");

    clear_env();
}

#[test]
#[serial]
fn test_non_numeric_session_timeout_rejected() {
    clear_env();
    set_required_env();
    env::set_var("SPOTTUBE_SESSION_TIMEOUT_SECS", "not-a-number");

    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_load_from_toml_file() {
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spottube.toml");
    std::fs::write(
        &path,
        r#"
session_timeout_secs = 900

[spotify]
client_id = "file-spotify-id"
client_secret = "file-spotify-secret"
redirect_uri = "http://localhost:8888/callback"

[youtube]
client_id = "file-youtube-id"
client_secret = "file-youtube-secret"
redirect_uri = "http://localhost:8888/youtube_callback"
scope = "https://www.googleapis.com/auth/youtube.force-ssl"
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.session_timeout_secs, 900);
    assert_eq!(config.spotify.client_id, "file-spotify-id");
    assert_eq!(config.youtube.client_id, "file-youtube-id");
    // File can override a default setting
    assert_eq!(
        config.youtube.scope,
        "https://www.googleapis.com/auth/youtube.force-ssl"
    );
    // Unset settings still fall through to compiled defaults
    assert_eq!(config.spotify.auth_url, "https://accounts.spotify.com/authorize");
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spottube.toml");
    std::fs::write(
        &path,
        r#"
[spotify]
client_id = "file-spotify-id"
client_secret = "file-spotify-secret"
redirect_uri = "http://localhost:8888/callback"

[youtube]
client_id = "file-youtube-id"
client_secret = "file-youtube-secret"
redirect_uri = "http://localhost:8888/youtube_callback"
"#,
    )
    .unwrap();

    env::set_var("SPOTTUBE_SPOTIFY_CLIENT_ID", "env-spotify-id");

    let config = Config::load(Some(&path)).unwrap();

    // Environment wins over the file
    assert_eq!(config.spotify.client_id, "env-spotify-id");
    // File still supplies everything else
    assert_eq!(config.spotify.client_secret, "file-spotify-secret");

    clear_env();
}

#[test]
#[serial]
fn test_missing_file_is_an_error() {
    clear_env();
    set_required_env();

    let result = Config::load(Some(std::path::Path::new(
        "/nonexistent/spottube-test-config.toml",
    )));
    assert!(result.is_err());

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_file_is_an_error() {
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spottube.toml");
    std::fs::write(&path, "this is not { valid toml").unwrap();

    assert!(Config::load(Some(&path)).is_err());
}
