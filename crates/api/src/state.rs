use std::sync::Arc;

use igpost_graph::api::MediaApi;
use igpost_graph::publisher::Publisher;

use crate::config::ServerConfig;

/// Publish orchestrator shared by all requests.
pub type SharedPublisher = Arc<Publisher<Arc<dyn MediaApi>>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Publish orchestrator, or `None` when the Graph API credentials are
    /// missing. Publish requests then fail with a configuration error.
    pub publisher: Option<SharedPublisher>,
}
