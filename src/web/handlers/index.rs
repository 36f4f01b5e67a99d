//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::api::dto::shorten::MAX_URL_LENGTH;

/// Template for the landing page with the shorten form.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
    pub version: &'static str,
    pub max_url_length: usize,
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {
        title: "Shorten a link",
        version: env!("CARGO_PKG_VERSION"),
        max_url_length: MAX_URL_LENGTH,
    }
}
