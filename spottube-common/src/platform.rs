//! Platform identifiers
//!
//! A conversion session talks to exactly two vendors: Spotify (source of
//! playlists) and YouTube (destination). Most shared code is parameterized
//! over which one it is dealing with.

use std::fmt;

/// The vendor platforms a session holds credentials for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Source platform: playlists are read from here
    Spotify,
    /// Destination platform: playlists are created here
    YouTube,
}

impl Platform {
    /// Human-readable name used in log output and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Spotify => "Spotify",
            Platform::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
