//! Sequential publish orchestration.
//!
//! A run walks `Creating -> Polling -> Publishing -> FetchingPermalink`.
//! Each remote call is raced against [`PublishSettings::request_timeout`];
//! the first failure aborts the run and nothing is rolled back (a created
//! container may be left unpublished).

use std::future::Future;
use std::time::Duration;

use igpost_core::publish::{ContainerStatus, MediaContainer, PublishRequest, PublishedMedia};

use crate::api::MediaApi;
use crate::config::GraphConfig;
use crate::error::{PublishError, PublishStage};

/// Delay between two status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Status checks made before publishing regardless of status.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 10;

/// Timing knobs for a publish run.
#[derive(Debug, Clone)]
pub struct PublishSettings {
    /// Upper bound for each remote call.
    pub request_timeout: Duration,
    /// Delay between two status checks.
    pub poll_interval: Duration,
    /// Maximum number of status checks (at least one is always made).
    pub max_poll_attempts: u32,
}

impl PublishSettings {
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            request_timeout: config.request_timeout,
            ..Self::default()
        }
    }
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(crate::config::DEFAULT_REQUEST_TIMEOUT_MS),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

/// Drives one [`MediaApi`] through a publish run.
///
/// Holds no per-run state, so a single instance can serve concurrent
/// requests.
pub struct Publisher<A> {
    api: A,
    settings: PublishSettings,
}

impl<A: MediaApi> Publisher<A> {
    pub fn new(api: A, settings: PublishSettings) -> Self {
        Self { api, settings }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    /// Publish one image and return its media id and permalink.
    ///
    /// `request` must already have passed
    /// [`PublishRequest::validate_input`].
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishedMedia, PublishError> {
        let container = self
            .bounded(PublishStage::Creating, self.api.create_container(request))
            .await?;
        tracing::info!(creation_id = %container.creation_id, "Media container created");

        self.wait_until_ready(&container).await?;

        let media_id = self
            .bounded(PublishStage::Publishing, self.api.publish_container(&container))
            .await?;
        tracing::info!(
            creation_id = %container.creation_id,
            media_id = %media_id,
            "Media published",
        );

        let permalink = self
            .bounded(PublishStage::FetchingPermalink, self.api.permalink(&media_id))
            .await?;
        tracing::info!(
            media_id = %media_id,
            permalink = permalink.as_deref().unwrap_or("<none>"),
            "Permalink fetched",
        );

        Ok(PublishedMedia {
            media_id,
            permalink,
        })
    }

    /// Poll the container until it is `FINISHED`, fails with `ERROR`, or
    /// the attempt budget runs out.
    ///
    /// Running out of attempts is not an error: the run moves on to
    /// publishing and lets the Graph API reject an unready container.
    async fn wait_until_ready(&self, container: &MediaContainer) -> Result<(), PublishError> {
        let max_attempts = self.settings.max_poll_attempts.max(1);

        for attempt in 1..=max_attempts {
            let status = self
                .bounded(PublishStage::Polling, self.api.container_status(container))
                .await?;

            match status {
                ContainerStatus::Finished => {
                    tracing::debug!(
                        creation_id = %container.creation_id,
                        attempt,
                        "Container ready",
                    );
                    return Ok(());
                }
                ContainerStatus::Error => {
                    tracing::warn!(
                        creation_id = %container.creation_id,
                        attempt,
                        "Container processing failed",
                    );
                    return Err(PublishError::Processing {
                        creation_id: container.creation_id.clone(),
                    });
                }
                other => {
                    tracing::debug!(
                        creation_id = %container.creation_id,
                        attempt,
                        status = %other,
                        "Container not ready yet",
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(self.settings.poll_interval).await;
                    }
                }
            }
        }

        tracing::warn!(
            creation_id = %container.creation_id,
            attempts = max_attempts,
            "Container still not ready after all status checks, publishing anyway",
        );
        Ok(())
    }

    /// Run one remote call under the per-call timeout. The call future is
    /// dropped on expiry, which cancels the underlying request.
    async fn bounded<T, F>(&self, stage: PublishStage, call: F) -> Result<T, PublishError>
    where
        F: Future<Output = Result<T, PublishError>>,
    {
        let after = self.settings.request_timeout;
        match tokio::time::timeout(after, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    stage = stage.label(),
                    timeout_ms = after.as_millis() as u64,
                    "Remote call timed out",
                );
                Err(PublishError::Timeout { stage, after })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
