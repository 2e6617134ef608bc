#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use igpost_api::config::ServerConfig;
use igpost_api::router::build_app_router;
use igpost_api::state::{AppState, SharedPublisher};
use igpost_core::publish::{ContainerStatus, MediaContainer, PublishRequest};
use igpost_graph::api::MediaApi;
use igpost_graph::error::{PublishError, PublishStage};
use igpost_graph::publisher::{PublishSettings, Publisher};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers.
///
/// `publisher` is `None` to simulate missing Graph API credentials.
pub fn build_test_app(publisher: Option<SharedPublisher>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        publisher,
    };
    build_app_router(state, &config)
}

/// Settings with a short poll interval so tests do not wait a second per poll.
pub fn fast_settings() -> PublishSettings {
    PublishSettings {
        request_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(5),
        ..PublishSettings::default()
    }
}

/// Wrap a scripted API into the publisher type held by `AppState`.
pub fn publisher_for(api: Arc<ScriptedApi>, settings: PublishSettings) -> SharedPublisher {
    let api: Arc<dyn MediaApi> = api;
    Arc::new(Publisher::new(api, settings))
}

// ---------------------------------------------------------------------------
// Scripted Graph API
// ---------------------------------------------------------------------------

/// A [`MediaApi`] that answers from a script and records each stage called.
pub struct ScriptedApi {
    pub statuses: Mutex<VecDeque<ContainerStatus>>,
    pub permalink: Option<String>,
    pub upstream_failure: Option<(PublishStage, String)>,
    pub stall_at: Option<PublishStage>,
    pub calls: Mutex<Vec<PublishStage>>,
}

impl ScriptedApi {
    /// Container finishes on the first status check; permalink present.
    pub fn finishing() -> Self {
        Self {
            statuses: Mutex::new(VecDeque::from([ContainerStatus::Finished])),
            permalink: Some("https://instagram.com/p/m1".into()),
            upstream_failure: None,
            stall_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_statuses(mut self, statuses: &[ContainerStatus]) -> Self {
        self.statuses = Mutex::new(statuses.iter().cloned().collect());
        self
    }

    pub fn failing_at(mut self, stage: PublishStage, message: &str) -> Self {
        self.upstream_failure = Some((stage, message.to_string()));
        self
    }

    pub fn stalling_at(mut self, stage: PublishStage) -> Self {
        self.stall_at = Some(stage);
        self
    }

    pub fn calls(&self) -> Vec<PublishStage> {
        self.calls.lock().unwrap().clone()
    }

    async fn step(&self, stage: PublishStage) -> Result<(), PublishError> {
        self.calls.lock().unwrap().push(stage);
        if self.stall_at == Some(stage) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        match &self.upstream_failure {
            Some((failing, message)) if *failing == stage => Err(PublishError::Upstream {
                stage,
                status: 400,
                message: message.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl MediaApi for ScriptedApi {
    async fn create_container(
        &self,
        _request: &PublishRequest,
    ) -> Result<MediaContainer, PublishError> {
        self.step(PublishStage::Creating).await?;
        Ok(MediaContainer {
            creation_id: "c1".into(),
        })
    }

    async fn container_status(
        &self,
        _container: &MediaContainer,
    ) -> Result<ContainerStatus, PublishError> {
        self.step(PublishStage::Polling).await?;
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ContainerStatus::InProgress))
    }

    async fn publish_container(
        &self,
        _container: &MediaContainer,
    ) -> Result<String, PublishError> {
        self.step(PublishStage::Publishing).await?;
        Ok("m1".into())
    }

    async fn permalink(&self, _media_id: &str) -> Result<Option<String>, PublishError> {
        self.step(PublishStage::FetchingPermalink).await?;
        Ok(self.permalink.clone())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request and return the response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw JSON body and return the response.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &body.to_string()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
