pub mod health;
pub mod instagram;
pub mod page;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /instagram/publish                               publish an image (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/instagram", instagram::router())
}
