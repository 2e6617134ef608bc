use axum::response::Html;

/// Static publish form; submits JSON to `/api/v1/instagram/publish`.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
