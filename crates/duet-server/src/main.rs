mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use duet_api::auth::{self, AppState, AppStateInner};
use duet_api::middleware::require_auth;
use duet_api::{countdown, files, notes, photos, surprises};

use crate::config::ServerConfig;

/// Uploads are capped at 10 MB by the handler; leave headroom for framing.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duet=debug,tower_http=debug".into()),
        )
        .init();

    // Config — fatal on any malformed date or missing secret
    let cfg = ServerConfig::from_env()?;

    // Derive the countdown target once; it only changes with configuration.
    let reunion_target =
        duet_core::reunion_target(cfg.couple.relationship_start, cfg.couple.reunion_offset_days)
            .ok_or_else(|| anyhow::anyhow!("reunion target is outside the representable date range"))?;
    info!(
        "Counting down to {} ({} days past {})",
        reunion_target, cfg.couple.reunion_offset_days, cfg.couple.relationship_start
    );

    // Init database and media storage
    let db = duet_db::Database::open(&cfg.db_path)?;
    tokio::fs::create_dir_all(&cfg.upload_dir).await?;
    info!("Media upload directory: {}", cfg.upload_dir.display());

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret: cfg.jwt_secret.clone(),
        couple: cfg.couple.clone(),
        reunion_target,
        upload_dir: cfg.upload_dir.clone(),
    });

    // Routes
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/countdown", get(countdown::get_countdown))
        .route("/meta", get(countdown::get_meta))
        .route("/health", get(health))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/photos", get(photos::get_photos))
        .route("/photos", post(photos::create_photo))
        .route("/notes", get(notes::get_notes))
        .route("/notes", post(notes::create_note))
        .route("/surprises", get(surprises::get_surprises))
        .route("/surprises", post(surprises::create_surprise))
        .route("/files", post(files::upload_file))
        .route("/files/{file_id}", get(files::download_file))
        .layer(middleware::from_fn(require_auth))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port).parse()?;
    info!("Duet server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
