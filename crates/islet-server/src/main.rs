//! islet-server: persona chat HTTP server.
//!
//! Exposes `POST /api/chat`, injecting the persona system prompt and a
//! bounded window of client-supplied history into a single upstream
//! completion call per request. The server keeps no conversation state of
//! its own — history lives with the client.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use axum::routing::{get, post};
use axum::Router;
use islet_ai::{CompletionGateway, PromptBuilder, UpstreamClient, UpstreamConfig};
use islet_config::Persona;

use crate::routes::AppState;

#[derive(Parser)]
#[command(name = "islet-server", about = "Persona chat proxy server")]
struct Args {
    /// Port to listen on (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a config TOML file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "islet_server=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => islet_config::load_from_path(path),
        None => islet_config::load_default(),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    let persona = match Persona::load(&config.persona) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "failed to load persona profile");
            std::process::exit(1);
        }
    };

    let upstream = match UpstreamConfig::from_provider(&config.provider) {
        Ok(u) => u,
        Err(e) => {
            tracing::error!(error = %e, "upstream provider not configured");
            std::process::exit(1);
        }
    };

    tracing::info!(persona = %persona.name, model = %upstream.model, "starting");

    let state = Arc::new(AppState {
        prompt: PromptBuilder::new(&persona),
        gateway: CompletionGateway::new(Arc::new(UpstreamClient::new(upstream))),
    });

    let app = Router::new()
        .route("/api/chat", post(routes::chat))
        .route("/api/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "failed to bind TCP listener");
            std::process::exit(1);
        }
    };

    tracing::info!("islet-server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
