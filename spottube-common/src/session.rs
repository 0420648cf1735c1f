//! Server-side session store
//!
//! Browsers hold only an opaque, signed session id. The OAuth tokens for
//! both platforms live in this process-held store and never leave the
//! server.
//!
//! Cookie value format: `{uuid}.{signature}`, where the signature is the
//! SHA-256 of the uuid string concatenated with a random secret generated
//! at startup. A tampered or forged cookie fails verification and is
//! treated as no session at all. Restarting the service rotates the secret
//! and invalidates every outstanding cookie.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::Platform;

/// OAuth tokens held for one platform within a session
#[derive(Debug, Clone)]
pub struct PlatformTokens {
    /// Bearer token sent on vendor Web API requests
    pub access_token: String,
    /// Long-lived token used to obtain fresh access tokens.
    /// Spotify may omit it on exchange; YouTube returns one when consent
    /// was requested with `access_type=offline`.
    pub refresh_token: Option<String>,
    /// Absolute expiry of `access_token` (Unix epoch seconds)
    pub expires_at: i64,
}

impl PlatformTokens {
    /// True when the access token is past its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.expires_at
    }
}

/// One session: fixed lifetime plus a token slot per platform
#[derive(Debug)]
struct SessionRecord {
    expires_at: i64,
    spotify: Option<PlatformTokens>,
    youtube: Option<PlatformTokens>,
}

impl SessionRecord {
    fn new(ttl_secs: u64) -> Self {
        Self {
            expires_at: Utc::now().timestamp() + ttl_secs as i64,
            spotify: None,
            youtube: None,
        }
    }

    // >= so a zero TTL expires immediately
    fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at
    }
}

/// Process-wide session store
///
/// Uses RwLock for concurrent read access with rare writes
pub struct SessionStore {
    /// Signing key for cookie values, generated fresh at startup
    secret: [u8; 32],
    /// Lifetime applied to each session at creation
    ttl_secs: u64,
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl SessionStore {
    /// Create a store with a fresh random signing secret
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            secret: rand::thread_rng().gen::<[u8; 32]>(),
            ttl_secs,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new session, returning its id and the signed cookie value
    pub async fn create(&self) -> (Uuid, String) {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, SessionRecord::new(self.ttl_secs));
        (id, self.cookie_value(&id))
    }

    /// Signed cookie value for a session id: `{uuid}.{sha256 hex}`
    pub fn cookie_value(&self, id: &Uuid) -> String {
        format!("{}.{}", id, self.sign(id))
    }

    /// Verify a cookie value, returning the session id when the signature
    /// matches and the session is still live
    pub async fn verify_cookie(&self, cookie_value: &str) -> Option<Uuid> {
        let (id_part, signature) = cookie_value.split_once('.')?;
        let id = Uuid::parse_str(id_part).ok()?;
        if self.sign(&id) != signature {
            return None;
        }
        let sessions = self.sessions.read().await;
        match sessions.get(&id) {
            Some(record) if !record.is_expired() => Some(id),
            _ => None,
        }
    }

    /// Stored tokens for one platform, if any
    pub async fn tokens(&self, id: Uuid, platform: Platform) -> Option<PlatformTokens> {
        let sessions = self.sessions.read().await;
        let record = sessions.get(&id)?;
        match platform {
            Platform::Spotify => record.spotify.clone(),
            Platform::YouTube => record.youtube.clone(),
        }
    }

    /// Replace the stored tokens for one platform
    ///
    /// Returns false when the session no longer exists (expired and swept
    /// between requests)
    pub async fn set_tokens(&self, id: Uuid, platform: Platform, tokens: PlatformTokens) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(record) => {
                match platform {
                    Platform::Spotify => record.spotify = Some(tokens),
                    Platform::YouTube => record.youtube = Some(tokens),
                }
                true
            }
            None => false,
        }
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn sweep(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired());
        before - sessions.len()
    }

    fn sign(&self, id: &Uuid) -> String {
        let mut hasher = Sha256::new();
        hasher.update(id.to_string().as_bytes());
        hasher.update(self.secret);
        format!("{:x}", hasher.finalize())
    }
}
