use axum::routing::get;
use axum::Router;

use crate::handlers::page;
use crate::state::AppState;

/// Mount the browser form at `/`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(page::index))
}
