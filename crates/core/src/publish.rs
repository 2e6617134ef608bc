//! Publish request and the values produced by each orchestration stage.
//!
//! A [`PublishRequest`] is validated once at the HTTP boundary with
//! [`PublishRequest::validate_input`]; the orchestrator trusts it from then
//! on. [`MediaContainer`], [`ContainerStatus`] and [`PublishedMedia`] only
//! live for the duration of one publish run.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum caption length accepted by Instagram, counted in characters.
pub const MAX_CAPTION_CHARS: u64 = 2200;

/// Status code reported while the container is still being processed.
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";

/// Status code reported once the container is ready to publish.
pub const STATUS_FINISHED: &str = "FINISHED";

/// Status code reported when processing failed.
pub const STATUS_ERROR: &str = "ERROR";

// ---------------------------------------------------------------------------
// PublishRequest
// ---------------------------------------------------------------------------

/// A user-submitted request to publish one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Publicly reachable absolute URL of the image.
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: String,

    /// Optional caption; an absent field deserializes to an empty string.
    #[serde(default)]
    #[validate(length(
        max = 2200,
        message = "caption must be at most 2200 characters"
    ))]
    pub caption: String,
}

impl PublishRequest {
    pub fn new(image_url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            caption: caption.into(),
        }
    }

    /// Check the URL format and caption length.
    pub fn validate_input(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(errors.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Stage values
// ---------------------------------------------------------------------------

/// A staged image awaiting publication, identified by its creation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaContainer {
    pub creation_id: String,
}

/// Processing status of a media container.
///
/// Only `FINISHED` and `ERROR` end the poll loop. Any other code the Graph
/// API reports (including `EXPIRED` or `PUBLISHED`) is kept verbatim in
/// [`ContainerStatus::Other`] and polled like `IN_PROGRESS`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ContainerStatus {
    InProgress,
    Finished,
    Error,
    Other(String),
}

impl ContainerStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            STATUS_IN_PROGRESS => Self::InProgress,
            STATUS_FINISHED => Self::Finished,
            STATUS_ERROR => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire representation of this status.
    pub fn as_code(&self) -> &str {
        match self {
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Finished => STATUS_FINISHED,
            Self::Error => STATUS_ERROR,
            Self::Other(code) => code,
        }
    }
}

impl From<String> for ContainerStatus {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Final result of a successful publish run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedMedia {
    pub media_id: String,
    /// Public URL of the post; the Graph API may omit it.
    pub permalink: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
