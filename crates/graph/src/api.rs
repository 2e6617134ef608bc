//! REST client for the Instagram content-publishing endpoints.
//!
//! [`MediaApi`] names the four remote calls a publish run needs;
//! [`GraphClient`] implements them against the Graph API using [`reqwest`].

use std::sync::Arc;

use async_trait::async_trait;
use igpost_core::publish::{ContainerStatus, MediaContainer, PublishRequest};
use serde::Deserialize;

use crate::config::GraphConfig;
use crate::error::{PublishError, PublishStage};

/// The remote operations driven by [`crate::publisher::Publisher`].
#[async_trait]
pub trait MediaApi: Send + Sync {
    /// Stage an image as a media container.
    async fn create_container(
        &self,
        request: &PublishRequest,
    ) -> Result<MediaContainer, PublishError>;

    /// Read the processing status of a container.
    async fn container_status(
        &self,
        container: &MediaContainer,
    ) -> Result<ContainerStatus, PublishError>;

    /// Publish a processed container, returning the new media id.
    async fn publish_container(&self, container: &MediaContainer)
        -> Result<String, PublishError>;

    /// Look up the public permalink of a published media object.
    async fn permalink(&self, media_id: &str) -> Result<Option<String>, PublishError>;
}

#[async_trait]
impl<T: MediaApi + ?Sized> MediaApi for Arc<T> {
    async fn create_container(
        &self,
        request: &PublishRequest,
    ) -> Result<MediaContainer, PublishError> {
        (**self).create_container(request).await
    }

    async fn container_status(
        &self,
        container: &MediaContainer,
    ) -> Result<ContainerStatus, PublishError> {
        (**self).container_status(container).await
    }

    async fn publish_container(
        &self,
        container: &MediaContainer,
    ) -> Result<String, PublishError> {
        (**self).publish_container(container).await
    }

    async fn permalink(&self, media_id: &str) -> Result<Option<String>, PublishError> {
        (**self).permalink(media_id).await
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// `{ "id": "..." }`, returned by both `/media` and `/media_publish`.
#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status_code: Option<ContainerStatus>,
}

#[derive(Debug, Deserialize)]
struct PermalinkResponse {
    #[serde(default)]
    permalink: Option<String>,
}

/// Graph API error envelope: `{ "error": { "message": "...", ... } }`.
#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

// ---------------------------------------------------------------------------
// GraphClient
// ---------------------------------------------------------------------------

/// HTTP client for one Instagram Business account.
pub struct GraphClient {
    client: reqwest::Client,
    config: Arc<GraphConfig>,
}

impl GraphClient {
    pub fn new(config: Arc<GraphConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] pool.
    pub fn with_client(client: reqwest::Client, config: Arc<GraphConfig>) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ---- private helpers ----

    async fn send(
        stage: PublishStage,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, PublishError> {
        request
            .send()
            .await
            .map_err(|e| Self::request_error(stage, e))
    }

    /// Return the response unchanged on 2xx, otherwise turn the Graph API
    /// error payload into [`PublishError::Upstream`].
    async fn ensure_success(
        stage: PublishStage,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PublishError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = graph_error_message(&body)
            .unwrap_or_else(|| stage.failure_message().to_string());

        tracing::warn!(
            stage = stage.label(),
            status = status.as_u16(),
            error = %message,
            "Graph API returned an error",
        );

        Err(PublishError::Upstream {
            stage,
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        stage: PublishStage,
        response: reqwest::Response,
    ) -> Result<T, PublishError> {
        let response = Self::ensure_success(stage, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| Self::request_error(stage, e))
    }

    /// reqwest errors embed the request URL, which carries the access token
    /// in its query string for GET calls.
    fn request_error(stage: PublishStage, source: reqwest::Error) -> PublishError {
        PublishError::Request {
            stage,
            source: source.without_url(),
        }
    }
}

#[async_trait]
impl MediaApi for GraphClient {
    async fn create_container(
        &self,
        request: &PublishRequest,
    ) -> Result<MediaContainer, PublishError> {
        let stage = PublishStage::Creating;
        let url = self
            .config
            .endpoint(&format!("{}/media", self.config.account_id));

        let response = Self::send(
            stage,
            self.client.post(url).form(&[
                ("image_url", request.image_url.as_str()),
                ("caption", request.caption.as_str()),
                ("access_token", self.config.access_token.as_str()),
            ]),
        )
        .await?;

        let IdResponse { id } = Self::parse_response(stage, response).await?;
        Ok(MediaContainer { creation_id: id })
    }

    async fn container_status(
        &self,
        container: &MediaContainer,
    ) -> Result<ContainerStatus, PublishError> {
        let stage = PublishStage::Polling;
        let url = self.config.endpoint(&container.creation_id);

        let response = Self::send(
            stage,
            self.client.get(url).query(&[
                ("fields", "status_code"),
                ("access_token", self.config.access_token.as_str()),
            ]),
        )
        .await?;

        let body: StatusResponse = Self::parse_response(stage, response).await?;
        Ok(body.status_code.unwrap_or(ContainerStatus::InProgress))
    }

    async fn publish_container(
        &self,
        container: &MediaContainer,
    ) -> Result<String, PublishError> {
        let stage = PublishStage::Publishing;
        let url = self
            .config
            .endpoint(&format!("{}/media_publish", self.config.account_id));

        let response = Self::send(
            stage,
            self.client.post(url).form(&[
                ("creation_id", container.creation_id.as_str()),
                ("access_token", self.config.access_token.as_str()),
            ]),
        )
        .await?;

        let IdResponse { id } = Self::parse_response(stage, response).await?;
        Ok(id)
    }

    async fn permalink(&self, media_id: &str) -> Result<Option<String>, PublishError> {
        let stage = PublishStage::FetchingPermalink;
        let url = self.config.endpoint(media_id);

        let response = Self::send(
            stage,
            self.client.get(url).query(&[
                ("fields", "permalink"),
                ("access_token", self.config.access_token.as_str()),
            ]),
        )
        .await?;

        let body: PermalinkResponse = Self::parse_response(stage, response).await?;
        Ok(body.permalink)
    }
}

/// Extract `error.message` from a Graph API error body, if present.
fn graph_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<GraphErrorBody>(body)
        .ok()?
        .error
        .message
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_is_read_from_graph_envelope() {
        let body = r#"{"error":{"message":"Invalid parameter","type":"OAuthException","code":100}}"#;
        assert_eq!(graph_error_message(body).as_deref(), Some("Invalid parameter"));
    }

    #[test]
    fn error_message_is_none_for_non_json_body() {
        assert_eq!(graph_error_message("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn error_message_is_none_when_message_missing() {
        assert_eq!(graph_error_message(r#"{"error":{"code":1}}"#), None);
    }

    #[test]
    fn status_response_without_code_deserializes() {
        let body: StatusResponse = serde_json::from_str(r#"{"id":"c1"}"#).unwrap();
        assert!(body.status_code.is_none());
    }
}
