use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use chrono::{Duration, Utc};
use rand::random;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::build_router;
use crate::app::AppState;
use crate::domain::models::session::SessionClaims;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::file_system::DataDirectory;
use crate::infrastructure::session::SESSION_COOKIE;

struct TestApp {
    state: Arc<AppState>,
    root: PathBuf,
}

impl TestApp {
    async fn new(allow_public_activation: bool) -> Self {
        let root = std::env::temp_dir().join(format!("portfolio-routes-{}", random::<u64>()));
        let data_directory = DataDirectory::new(root.clone());
        data_directory.initialize().await.expect("initialize data directory");

        let mut config = AppConfig::default();
        config.security.session_secret = "route-test-secret".to_string();
        config.security.allow_public_activation = allow_public_activation;

        Self {
            state: Arc::new(AppState::with_config(data_directory, config)),
            root,
        }
    }

    fn admin_cookie(&self) -> String {
        let claims = SessionClaims::new("admin", Utc::now() + Duration::hours(1));
        let token = self.state.session_signer.issue(&claims).expect("issue token");
        format!("{}={}", SESSION_COOKIE, token)
    }

    async fn send(&self, request: Request<Body>) -> Response {
        build_router(self.state.clone())
            .oneshot(request)
            .await
            .expect("router response")
    }

    async fn create(&self, body: Value, cookie: Option<&str>) -> Response {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/themes")
            .header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        self.send(request.body(Body::from(body.to_string())).expect("request"))
            .await
    }

    async fn put(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().method(Method::PUT).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).expect("request")).await
    }

    async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).expect("request"))
            .await
    }

    async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.root).await;
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn ocean() -> Value {
    json!({
        "name": "Ocean",
        "variables": {
            "primary": "#0ea5e9",
            "secondary": "#14b8a6",
            "background": "#f0f9ff",
            "foreground": "#082f49",
            "accent": "#f97316",
            "border": "#bae6fd"
        }
    })
}

#[tokio::test]
async fn ocean_theme_flows_from_admin_to_client() {
    let app = TestApp::new(true).await;
    let cookie = app.admin_cookie();

    let response = app.create(ocean(), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["isActive"], false);
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let response = app.put(&format!("/themes/{}/activate", id), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let activated = json_body(response).await;
    assert_eq!(activated["data"]["id"], id.as_str());
    assert_eq!(activated["data"]["isActive"], true);

    let response = app.get("/themes/active").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CACHE_CONTROL).expect("cache header"),
        "no-cache, no-store, must-revalidate"
    );
    let active = json_body(response).await;
    assert_eq!(active["data"]["name"], "Ocean");
    assert_eq!(active["data"]["variables"]["accent"], "#f97316");

    app.cleanup().await;
}

#[tokio::test]
async fn activation_replaces_the_cached_active_theme() {
    let app = TestApp::new(true).await;
    let cookie = app.admin_cookie();
    let seeded = app
        .state
        .theme_service
        .seed_default_themes()
        .await
        .expect("seed");

    let first = json_body(app.get("/themes/active").await).await;
    assert_eq!(first["data"]["name"], seeded[0].name.as_str());

    let response = app
        .put(&format!("/themes/{}/activate", seeded[1].id), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let second = json_body(app.get("/themes/active").await).await;
    assert_eq!(second["data"]["name"], seeded[1].name.as_str());

    let listed = json_body(app.get("/themes").await).await;
    let active_count = listed["data"]
        .as_array()
        .expect("theme list")
        .iter()
        .filter(|theme| theme["isActive"] == true)
        .count();
    assert_eq!(active_count, 1);

    app.cleanup().await;
}

#[tokio::test]
async fn active_theme_is_null_before_any_activation() {
    let app = TestApp::new(true).await;

    let body = json_body(app.get("/themes/active").await).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Null);

    app.cleanup().await;
}

#[tokio::test]
async fn admin_routes_require_a_valid_session() {
    let app = TestApp::new(true).await;

    let response = app.create(ocean(), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["success"], false);

    let forged = format!("{}=eyJzdWIiOiJhZG1pbiJ9.bm9wZQ", SESSION_COOKIE);
    let response = app.put("/themes/anything/activate", Some(&forged)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let listed = json_body(app.get("/themes").await).await;
    assert_eq!(listed["data"], json!([]));

    app.cleanup().await;
}

#[tokio::test]
async fn invalid_payload_reports_first_violation() {
    let app = TestApp::new(true).await;
    let cookie = app.admin_cookie();

    let mut body = ocean();
    let variables = body["variables"].as_object_mut().expect("variables");
    variables.remove("secondary");
    variables.remove("border");

    let response = app.create(body, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Theme variable 'secondary' is required"
    );

    let response = app
        .create(json!({ "name": "  ", "variables": ocean()["variables"] }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Theme name is required");

    app.cleanup().await;
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new(true).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/themes")
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, app.admin_cookie())
        .body(Body::from("{ not json"))
        .expect("request");

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);

    app.cleanup().await;
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let app = TestApp::new(true).await;
    let cookie = app.admin_cookie();

    assert_eq!(app.create(ocean(), Some(&cookie)).await.status(), StatusCode::OK);

    let mut renamed = ocean();
    renamed["name"] = json!("ocean");
    let response = app.create(renamed, Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    app.cleanup().await;
}

#[tokio::test]
async fn unknown_theme_is_not_found() {
    let app = TestApp::new(true).await;
    let cookie = app.admin_cookie();

    let response = app.put("/themes/missing-id/activate", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["success"], false);

    app.cleanup().await;
}

#[tokio::test]
async fn public_activation_follows_config() {
    let enabled = TestApp::new(true).await;
    let seeded = enabled
        .state
        .theme_service
        .seed_default_themes()
        .await
        .expect("seed");

    let response = enabled
        .put(&format!("/themes/{}/activate-public", seeded[2].id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["isActive"], true);
    enabled.cleanup().await;

    let disabled = TestApp::new(false).await;
    let seeded = disabled
        .state
        .theme_service
        .seed_default_themes()
        .await
        .expect("seed");

    let response = disabled
        .put(&format!("/themes/{}/activate-public", seeded[2].id), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let active = disabled
        .state
        .theme_service
        .get_active_theme()
        .await
        .expect("active theme")
        .expect("seeded theme is active");
    assert_eq!(active.id, seeded[0].id);
    disabled.cleanup().await;
}

#[tokio::test]
async fn active_theme_css_renders_custom_properties() {
    let app = TestApp::new(true).await;

    let response = app.get("/themes/active.css").await;
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert_eq!(&bytes[..], b":root {\n}\n");

    let seeded = app
        .state
        .theme_service
        .seed_default_themes()
        .await
        .expect("seed");
    app.state.active_theme_cache.invalidate().await;

    let response = app.get("/themes/active.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/css")));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let css = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(css.contains(&format!("--primary: {};", seeded[0].variables.primary)));

    app.cleanup().await;
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new(true).await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "success": true, "message": "ok" }));

    app.cleanup().await;
}
