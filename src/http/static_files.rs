//! Root document and static asset serving.
//!
//! `GET /` serves `index.html` from the static directory when it exists and
//! falls back to a plain-text home page otherwise. Everything else in the
//! directory is reachable under `/static`.

use std::path::Path;

use axum::{handler::HandlerWithoutStateExt, Router};
use tower_http::services::ServeDir;

/// Body served at `/` when no `index.html` is present.
pub const HOME_PAGE: &str = "Basic Home Page";

async fn home_page() -> &'static str {
    HOME_PAGE
}

/// Routes for `/` and `/static/*` rooted at `dir`.
pub fn routes<S>(dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route_service("/", ServeDir::new(dir).fallback(home_page.into_service()))
        .nest_service("/static", ServeDir::new(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn falls_back_to_home_page() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get(routes(dir.path()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, HOME_PAGE);
    }

    #[tokio::test]
    async fn serves_index_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>SawThat</h1>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

        let (status, body) = get(routes(dir.path()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>SawThat</h1>");

        let (status, body) = get(routes(dir.path()), "/static/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");

        let (status, _) = get(routes(dir.path()), "/static/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
