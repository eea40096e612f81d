use crate::call::{CallCommand, Switchboard};
use crate::config::Config;
use crate::signaling::{SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Liveness probe.
pub async fn health_check() -> &'static str {
    "Running"
}

/// Start the switchboard task and return the service the socket handlers share.
pub fn spawn_switchboard(command_buffer: usize) -> SignalingService {
    let (cmd_tx, cmd_rx) = mpsc::channel::<CallCommand>(command_buffer);
    let signaling = SignalingService::new(cmd_tx);

    let switchboard = Switchboard::new(cmd_rx, Arc::new(signaling.clone()));
    tokio::spawn(switchboard.run());

    signaling
}

pub fn build_router(config: &Config, signaling: SignalingService) -> Result<Router> {
    let origin = if config.allowed_origin == "*" {
        AllowOrigin::any()
    } else {
        let value = HeaderValue::from_str(&config.allowed_origin)
            .with_context(|| format!("invalid allowed origin '{}'", config.allowed_origin))?;
        AllowOrigin::exact(value)
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(health_check))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(signaling))
}

pub async fn serve(config: Config) -> Result<()> {
    let signaling = spawn_switchboard(config.command_buffer);
    let app = build_router(&config, signaling)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Signaling server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
