pub mod health;
pub mod nav;
pub mod portfolio;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        // Navigation API (hydration manifest + headless sessions)
        .route("/api/v1/nav", get(nav::handle_get_nav))
        .route("/api/v1/nav/simulate", post(nav::handle_simulate))
        .route("/api/v1/portfolio/cards", post(portfolio::handle_project_cards));

    // An external resume URL is opened directly by the client; only serve local paths.
    if state.config.resume_url.starts_with('/') {
        router = router.route(&state.config.resume_url, get(resume::handle_resume));
    } else {
        warn!(
            "RESUME_URL '{}' is not a local path; resume route disabled",
            state.config.resume_url
        );
    }

    let site = ServeDir::new(&state.config.site_dir);
    router.fallback_service(site).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::nav::links::default_links;
    use crate::nav::NavConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state(site: &TempDir) -> AppState {
        let config = Config {
            port: 0,
            rust_log: "debug".to_string(),
            site_dir: site.path().to_path_buf(),
            nav_manifest: None,
            resume_file: site.path().join("resume.pdf"),
            resume_url: "/resume.pdf".to_string(),
            resume_download_name: "Jane_Doe_Resume.pdf".to_string(),
            nav: NavConfig::default(),
        };
        AppState::new(config, default_links())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let site = tempfile::tempdir().unwrap();
        let response = build_router(test_state(&site))
            .oneshot(get("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_nav_manifest() {
        let site = tempfile::tempdir().unwrap();
        let response = build_router(test_state(&site))
            .oneshot(get("/api/v1/nav"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["links"].as_array().unwrap().len(), 7);
        assert_eq!(json["links"][3]["targetId"], "work-projects");
        assert_eq!(json["probeOffset"], 100.0);
        assert_eq!(json["headerClearance"], 80.0);
        assert_eq!(json["mobileMenuId"], "mobile-menu");
        assert_eq!(json["resumeUrl"], "/resume.pdf");
    }

    #[tokio::test]
    async fn test_simulate_session() {
        let site = tempfile::tempdir().unwrap();
        let request = post_json(
            "/api/v1/nav/simulate",
            json!({
                "sections": [
                    { "id": "about", "top": 500.0, "height": 400.0 },
                    { "id": "skills", "top": 900.0, "height": 300.0 },
                    { "id": "contact", "top": 1200.0, "height": 400.0 }
                ],
                "events": [
                    { "type": "scroll", "offset": 840.0 },
                    { "type": "toggle_menu" },
                    { "type": "click", "target": "contact" }
                ]
            }),
        );

        let response = build_router(test_state(&site)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["steps"][0]["state"]["activeSection"], "skills");
        assert_eq!(json["steps"][1]["state"]["menuOpen"], true);
        assert_eq!(json["steps"][2]["state"]["menuOpen"], false);
        assert_eq!(json["steps"][2]["defaultPrevented"], true);
        assert_eq!(json["steps"][2]["requests"][0]["top"], 1120.0);
    }

    #[tokio::test]
    async fn test_simulate_rejects_bad_geometry() {
        let site = tempfile::tempdir().unwrap();
        let request = post_json(
            "/api/v1/nav/simulate",
            json!({
                "sections": [{ "id": "about", "top": 0.0, "height": -10.0 }],
                "events": []
            }),
        );

        let response = build_router(test_state(&site)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_project_cards() {
        let site = tempfile::tempdir().unwrap();
        let request = post_json(
            "/api/v1/portfolio/cards",
            json!({
                "projects": [
                    { "id": "a", "title": "A", "status": "archived", "startDate": "2022-12", "endDate": "2023-05" },
                    { "id": "b", "title": "B", "status": "In Progress", "startDate": "2024-01" },
                    { "id": "c", "title": "C", "status": "ideation", "startDate": "2024-06-10", "endDate": "" }
                ]
            }),
        );

        let response = build_router(test_state(&site)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["cards"][0]["status"], "completed");
        assert_eq!(json["cards"][0]["dateRange"], "Dec 2022 - May 2023");
        assert_eq!(json["cards"][1]["statusLabel"], "In Progress");
        assert_eq!(json["cards"][1]["dateRange"], "Jan 2024");
        assert_eq!(json["cards"][2]["status"], "ideation");
        assert_eq!(json["cards"][2]["dateRange"], "Jun 2024");
    }

    #[tokio::test]
    async fn test_project_cards_require_start_date() {
        let site = tempfile::tempdir().unwrap();
        let request = post_json(
            "/api/v1/portfolio/cards",
            json!({ "projects": [{ "id": "x", "title": "X", "startDate": " " }] }),
        );

        let response = build_router(test_state(&site)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resume_served_inline() {
        let site = tempfile::tempdir().unwrap();
        std::fs::write(site.path().join("resume.pdf"), b"%PDF-1.7 test").unwrap();

        let response = build_router(test_state(&site))
            .oneshot(get("/resume.pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"Jane_Doe_Resume.pdf\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"%PDF-1.7 test");
    }

    #[tokio::test]
    async fn test_resume_honours_range_requests() {
        let site = tempfile::tempdir().unwrap();
        std::fs::write(site.path().join("resume.pdf"), b"%PDF-1.7 test").unwrap();

        let request = Request::builder()
            .uri("/resume.pdf")
            .header(header::RANGE, "bytes=0-3")
            .body(Body::empty())
            .unwrap();
        let response = build_router(test_state(&site)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 0-3/13");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert!(response.headers().contains_key(header::CONTENT_DISPOSITION));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"%PDF");
    }

    #[tokio::test]
    async fn test_resume_directory_is_not_found() {
        let site = tempfile::tempdir().unwrap();
        std::fs::create_dir(site.path().join("resume.pdf")).unwrap();

        let response = build_router(test_state(&site))
            .oneshot(get("/resume.pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_resume_is_not_found() {
        let site = tempfile::tempdir().unwrap();
        let response = build_router(test_state(&site))
            .oneshot(get("/resume.pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_static_site_fallback() {
        let site = tempfile::tempdir().unwrap();
        std::fs::write(site.path().join("index.html"), "<main id=\"main-content\"></main>").unwrap();

        let response = build_router(test_state(&site))
            .oneshot(get("/index.html"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(std::str::from_utf8(&body).unwrap().contains("main-content"));
    }

    #[tokio::test]
    async fn test_external_resume_url_disables_route() {
        let site = tempfile::tempdir().unwrap();
        std::fs::write(site.path().join("resume.pdf"), b"%PDF").unwrap();
        let mut state = test_state(&site);
        state.config.resume_url = "https://cdn.example.com/resume.pdf".to_string();

        let response = build_router(state)
            .oneshot(get("/api/v1/nav"))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await["resumeUrl"],
            "https://cdn.example.com/resume.pdf"
        );
    }
}
