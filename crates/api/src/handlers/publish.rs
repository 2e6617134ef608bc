//! Handler for publishing an image to Instagram.
//!
//! The request body is validated before anything else, then the Graph API
//! configuration is checked; only then does the publish run start. The
//! handler awaits the whole run and answers with the media id and permalink.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use igpost_core::error::CoreError;
use igpost_core::publish::{PublishRequest, PublishedMedia};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Message returned when the Graph API credentials were not loaded.
pub const NOT_CONFIGURED_MESSAGE: &str = "Server is not configured (missing IG env vars)";

/// Success payload: `{ "ok": true, "mediaId": "...", "permalink": "..." }`.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub media: PublishedMedia,
}

/// POST /api/v1/instagram/publish
pub async fn publish_image(
    State(state): State<AppState>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> AppResult<Json<PublishResponse>> {
    let Json(input) = payload.map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
    input.validate_input()?;

    let publisher = state
        .publisher
        .as_ref()
        .ok_or_else(|| CoreError::Configuration(NOT_CONFIGURED_MESSAGE.into()))?;

    tracing::info!(
        image_url = %input.image_url,
        caption_chars = input.caption.chars().count(),
        "Publishing image",
    );

    let media = publisher.publish(&input).await?;

    Ok(Json(PublishResponse { ok: true, media }))
}
