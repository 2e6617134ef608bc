use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use igpost_api::config::ServerConfig;
use igpost_api::router::build_app_router;
use igpost_api::state::{AppState, SharedPublisher};
use igpost_graph::api::{GraphClient, MediaApi};
use igpost_graph::config::GraphConfig;
use igpost_graph::publisher::{PublishSettings, Publisher};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "igpost_api=debug,igpost_graph=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Graph API ---
    let publisher = match GraphConfig::from_env() {
        Ok(graph) => {
            tracing::info!(
                account_id = %graph.account_id,
                api_version = %graph.api_version,
                timeout_ms = graph.request_timeout.as_millis() as u64,
                "Loaded Graph API configuration",
            );
            Some(build_publisher(graph))
        }
        Err(e) => {
            tracing::error!(error = %e, "Graph API not configured, publish requests will fail");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        publisher,
    };

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

fn build_publisher(graph: GraphConfig) -> SharedPublisher {
    let settings = PublishSettings::from_config(&graph);
    let api: Arc<dyn MediaApi> = Arc::new(GraphClient::new(Arc::new(graph)));
    Arc::new(Publisher::new(api, settings))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
