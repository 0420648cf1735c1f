//! spottube-web - Spotify to YouTube playlist conversion service
//!
//! Serves the OAuth login flows for both platforms, the playlist picker,
//! and the conversion page, backed by in-memory signed-cookie sessions.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use spottube_common::config::Config;
use spottube_web::{build_router, AppState};
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Interval between expired-session sweeps
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Command-line arguments for spottube-web
#[derive(Parser, Debug)]
#[command(name = "spottube-web")]
#[command(about = "Spotify to YouTube playlist conversion service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8888", env = "SPOTTUBE_PORT")]
    port: u16,

    /// Address to bind
    #[arg(short, long, default_value = "0.0.0.0", env = "SPOTTUBE_BIND")]
    bind: String,

    /// Optional TOML configuration file
    #[arg(short, long, env = "SPOTTUBE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spottube_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting SpotTube Web (spottube-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    info!(
        "Session timeout: {}s, callbacks: {} / {}",
        config.session_timeout_secs, config.spotify.redirect_uri, config.youtube.redirect_uri
    );

    let state = AppState::new(config);

    // Expired sessions are only ever dropped by this sweeper
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sessions.sweep().await;
            if removed > 0 {
                debug!(removed, "swept expired sessions");
            }
        }
    });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .context("Invalid bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("spottube-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
