use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomfit_api::config::ServerConfig;
use roomfit_api::router::build_app_router;
use roomfit_api::state::AppState;
use roomfit_core::catalog::Catalog;
use roomfit_gemini::analyzer::RoomAnalyzer;
use roomfit_gemini::api::GeminiApi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roomfit_api=debug,roomfit_gemini=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if config.gemini.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; room analysis requests will fail");
    }

    // --- Catalog ---
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::bundled(),
    }
    .expect("Failed to load product catalog");
    tracing::info!(products = catalog.len(), "Product catalog loaded");

    // --- Model API ---
    let gemini = GeminiApi::new(config.gemini.api_url.clone(), config.gemini.model.clone());
    tracing::info!(model = gemini.model(), "Gemini client created");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        analyzer: RoomAnalyzer::new(Arc::new(gemini)),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
