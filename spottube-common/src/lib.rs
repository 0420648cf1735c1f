//! # SpotTube Common Library
//!
//! Shared code for the SpotTube playlist converter:
//! - Configuration loading (TOML file + environment overrides)
//! - Error types
//! - Platform identifiers
//! - Session store (signed session cookies, per-platform OAuth tokens)

pub mod config;
pub mod error;
pub mod platform;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use platform::Platform;
