//! Failure taxonomy for a publish run.

use std::time::Duration;

/// The orchestration stage a remote call belongs to.
///
/// Runs move through these in declaration order; any stage may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Creating,
    Polling,
    Publishing,
    FetchingPermalink,
}

impl PublishStage {
    /// Human-readable label used in timeout messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Creating => "Create media container",
            Self::Polling => "Check container status",
            Self::Publishing => "Publish media",
            Self::FetchingPermalink => "Get permalink",
        }
    }

    /// Message reported when the Graph API fails without an error payload.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Creating => "Failed to create media container",
            Self::Polling => "Failed to get container status",
            Self::Publishing => "Failed to publish media",
            Self::FetchingPermalink => "Failed to fetch permalink",
        }
    }
}

impl std::fmt::Display for PublishStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that abort a publish run. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The remote call did not complete within the configured bound.
    #[error("{stage} timed out after {}ms", .after.as_millis())]
    Timeout { stage: PublishStage, after: Duration },

    /// The Graph API answered with a non-2xx status.
    ///
    /// `message` is the API's own `error.message` when it sent one.
    #[error("{message}")]
    Upstream {
        stage: PublishStage,
        status: u16,
        message: String,
    },

    /// The HTTP request failed or the response body could not be decoded.
    #[error("{stage} request failed: {source}")]
    Request {
        stage: PublishStage,
        source: reqwest::Error,
    },

    /// The container reported `ERROR` while being processed.
    #[error("Media processing failed on Instagram")]
    Processing { creation_id: String },
}

impl PublishError {
    /// Stage at which the run failed.
    pub fn stage(&self) -> PublishStage {
        match self {
            Self::Timeout { stage, .. }
            | Self::Upstream { stage, .. }
            | Self::Request { stage, .. } => *stage,
            Self::Processing { .. } => PublishStage::Polling,
        }
    }
}
