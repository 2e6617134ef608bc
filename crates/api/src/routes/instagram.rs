use axum::routing::post;
use axum::Router;

use crate::handlers::publish;
use crate::state::AppState;

/// Routes mounted at `/api/v1/instagram`.
///
/// ```text
/// POST /publish    create, await and publish a media container
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/publish", post(publish::publish_image))
}
