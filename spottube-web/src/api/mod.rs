//! HTTP API handlers
//!
//! One module per page or flow, re-exported flat for the router.

pub mod convert;
pub mod health;
pub mod login;
pub mod playlists;
pub mod session;
pub mod ui;

pub use convert::conversion_page;
pub use health::health_routes;
pub use login::{spotify_callback, spotify_login, spotify_refresh, youtube_callback, youtube_login};
pub use playlists::{choose_playlist, playlists_page};
pub use session::{session_middleware, SessionId};
pub use ui::landing_page;
