//! Configuration loading for the SpotTube services
//!
//! Every setting resolves in priority order:
//! 1. Environment variable (`SPOTTUBE_*`, highest priority)
//! 2. TOML config file entry
//! 3. Compiled default (vendor endpoints and scopes only)
//!
//! Client credentials have no compiled default: loading fails when they are
//! absent from both the environment and the config file.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default session lifetime in seconds (2 hours)
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 7200;

/// Compiled defaults for one platform's endpoints
struct PlatformDefaults {
    auth_url: &'static str,
    token_url: &'static str,
    api_base_url: &'static str,
    scope: &'static str,
}

const SPOTIFY_DEFAULTS: PlatformDefaults = PlatformDefaults {
    auth_url: "https://accounts.spotify.com/authorize",
    token_url: "https://accounts.spotify.com/api/token",
    api_base_url: "https://api.spotify.com/v1",
    scope: "playlist-read-private playlist-read-collaborative",
};

const YOUTUBE_DEFAULTS: PlatformDefaults = PlatformDefaults {
    auth_url: "https://accounts.google.com/o/oauth2/v2/auth",
    token_url: "https://oauth2.googleapis.com/token",
    api_base_url: "https://www.googleapis.com/youtube/v3",
    scope: "https://www.googleapis.com/auth/youtube",
};

/// Service configuration after all sources are merged
#[derive(Debug, Clone)]
pub struct Config {
    /// Idle session lifetime in seconds
    pub session_timeout_secs: u64,
    pub spotify: PlatformConfig,
    pub youtube: PlatformConfig,
}

/// OAuth application settings for one platform
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered with the vendor, e.g.
    /// `http://localhost:8888/callback`
    pub redirect_uri: String,
    /// Consent page the user's browser is sent to
    pub auth_url: String,
    /// Endpoint that exchanges codes and refresh tokens for access tokens
    pub token_url: String,
    /// Web API base, without trailing slash
    pub api_base_url: String,
    /// Space-separated scopes requested at consent
    pub scope: String,
}

/// Raw TOML file contents; every field optional
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    session_timeout_secs: Option<u64>,
    #[serde(default)]
    spotify: TomlPlatform,
    #[serde(default)]
    youtube: TomlPlatform,
}

#[derive(Debug, Default, Deserialize)]
struct TomlPlatform {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    auth_url: Option<String>,
    token_url: Option<String>,
    api_base_url: Option<String>,
    scope: Option<String>,
}

impl Config {
    /// Load configuration, merging an optional TOML file with the
    /// environment per the priority order documented at module level
    pub fn load(config_file: Option<&Path>) -> Result<Config> {
        let file = match config_file {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                toml::from_str::<TomlConfig>(&content).map_err(|e| {
                    Error::Config(format!("Cannot parse {}: {}", path.display(), e))
                })?
            }
            None => TomlConfig::default(),
        };

        let session_timeout_secs = match std::env::var("SPOTTUBE_SESSION_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| {
                Error::Config(format!(
                    "SPOTTUBE_SESSION_TIMEOUT_SECS is not a number: {value}"
                ))
            })?,
            Err(_) => file
                .session_timeout_secs
                .unwrap_or(DEFAULT_SESSION_TIMEOUT_SECS),
        };

        Ok(Config {
            session_timeout_secs,
            spotify: PlatformConfig::resolve("SPOTTUBE_SPOTIFY", file.spotify, &SPOTIFY_DEFAULTS)?,
            youtube: PlatformConfig::resolve("SPOTTUBE_YOUTUBE", file.youtube, &YOUTUBE_DEFAULTS)?,
        })
    }

    /// Load configuration from the environment alone (no config file)
    pub fn from_env() -> Result<Config> {
        Config::load(None)
    }
}

impl PlatformConfig {
    fn resolve(
        env_prefix: &str,
        file: TomlPlatform,
        defaults: &PlatformDefaults,
    ) -> Result<PlatformConfig> {
        let api_base_url = resolve_value(
            &format!("{env_prefix}_API_BASE_URL"),
            file.api_base_url,
            Some(defaults.api_base_url),
        )?;

        Ok(PlatformConfig {
            client_id: resolve_value(&format!("{env_prefix}_CLIENT_ID"), file.client_id, None)?,
            client_secret: resolve_value(
                &format!("{env_prefix}_CLIENT_SECRET"),
                file.client_secret,
                None,
            )?,
            redirect_uri: resolve_value(
                &format!("{env_prefix}_REDIRECT_URI"),
                file.redirect_uri,
                None,
            )?,
            auth_url: resolve_value(
                &format!("{env_prefix}_AUTH_URL"),
                file.auth_url,
                Some(defaults.auth_url),
            )?,
            token_url: resolve_value(
                &format!("{env_prefix}_TOKEN_URL"),
                file.token_url,
                Some(defaults.token_url),
            )?,
            // Endpoint paths are appended with a leading slash
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            scope: resolve_value(&format!("{env_prefix}_SCOPE"), file.scope, Some(defaults.scope))?,
        })
    }
}

/// Resolve one setting following the documented priority order
fn resolve_value(env_key: &str, file_value: Option<String>, default: Option<&str>) -> Result<String> {
    // Priority 1: Environment variable
    if let Ok(value) = std::env::var(env_key) {
        if !value.is_empty() {
            return Ok(value);
        }
    }

    // Priority 2: TOML config file
    if let Some(value) = file_value {
        return Ok(value);
    }

    // Priority 3: Compiled default
    match default {
        Some(value) => Ok(value.to_string()),
        None => Err(Error::Config(format!("{env_key} is not set"))),
    }
}
