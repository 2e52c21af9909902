use super::*;
use crate::config::AppConfig;
use crate::services::session::{SessionStore, SessionUser};
use crate::state::test_helpers::memory_state;
use axum::body::Body;
use axum::http::{Request, header};
use std::time::Duration;
use tower::ServiceExt;

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn logged_in_cookie(store: &dyn SessionStore, user_id: &str) -> String {
    let user = SessionUser { user_id: user_id.into(), name: "alice".into() };
    let token = store.create(&user).await.unwrap();
    format!("session_token={token}")
}

// =============================================================================
// Page shell
// =============================================================================

#[tokio::test]
async fn home_anonymous_renders_login_and_register() {
    let (state, _) = memory_state(AppConfig::default());
    let resp = app(state).oneshot(get_with_cookie("/", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-store");
    let html = body_string(resp).await;
    assert!(html.contains(r#"href="/login""#));
    assert!(html.contains(">Login</a>"));
    assert!(html.contains(r#"href="/register""#));
    assert!(!html.contains("Logout"));
    assert!(html.contains(r#""status":"anonymous""#));
}

#[tokio::test]
async fn home_logged_in_renders_profile_and_logout() {
    let (state, store) = memory_state(AppConfig::default());
    let cookie = logged_in_cookie(store.as_ref(), "42").await;
    let resp = app(state).oneshot(get_with_cookie("/", Some(&cookie))).await.unwrap();

    let html = body_string(resp).await;
    assert!(html.contains(r#"href="/profile/42""#));
    assert!(html.contains(">Profile</a>"));
    assert!(html.contains(r#"href="/logout""#));
    assert!(!html.contains(">Login<"));
    assert!(!html.contains(">Register<"));
    assert!(html.contains(r#""status":"logged_in""#));
}

#[tokio::test]
async fn home_unknown_token_is_anonymous() {
    let (state, _) = memory_state(AppConfig::default());
    let resp = app(state)
        .oneshot(get_with_cookie("/", Some("session_token=forged")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains(">Login<"));
}

#[tokio::test]
async fn home_expired_token_is_anonymous() {
    let config = AppConfig { session_ttl: Duration::ZERO, ..AppConfig::default() };
    let (state, store) = memory_state(config);
    let cookie = logged_in_cookie(store.as_ref(), "42").await;

    let resp = app(state.clone()).oneshot(get_with_cookie("/", Some(&cookie))).await.unwrap();
    let html = body_string(resp).await;
    assert!(html.contains(">Login</a>"));
    assert!(html.contains(">Register</a>"));
    assert!(!html.contains("/profile/42"));

    let resp = app(state.clone())
        .oneshot(get_with_cookie("/partials/auth-buttons", Some(&cookie)))
        .await
        .unwrap();
    assert!(body_string(resp).await.contains(">Login</a>"));

    let resp = app(state).oneshot(get_with_cookie("/api/auth/nav", Some(&cookie))).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["logged_in"], false);
}

#[tokio::test]
async fn home_honors_custom_cookie_name() {
    let config = AppConfig { cookie_name: "sessionid".into(), ..AppConfig::default() };
    let (state, store) = memory_state(config);
    let token = store
        .create(&SessionUser { user_id: "5".into(), name: "eve".into() })
        .await
        .unwrap();

    let ignored = format!("session_token={token}");
    let resp = app(state.clone()).oneshot(get_with_cookie("/", Some(&ignored))).await.unwrap();
    assert!(body_string(resp).await.contains(">Login<"));

    let honored = format!("sessionid={token}");
    let resp = app(state).oneshot(get_with_cookie("/", Some(&honored))).await.unwrap();
    assert!(body_string(resp).await.contains("/profile/5"));
}

// =============================================================================
// Partial + JSON
// =============================================================================

#[tokio::test]
async fn partial_returns_only_link_markup() {
    let (state, store) = memory_state(AppConfig::default());
    let cookie = logged_in_cookie(store.as_ref(), "7").await;
    let resp = app(state)
        .oneshot(get_with_cookie("/partials/auth-buttons", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::VARY], "Cookie");
    let html = body_string(resp).await;
    assert!(html.contains(r#"href="/profile/7""#));
    assert!(html.contains(r#"href="/logout""#));
    assert!(!html.contains("<nav"));
    assert!(!html.contains("<html"));
}

#[tokio::test]
async fn nav_json_anonymous() {
    let (state, _) = memory_state(AppConfig::default());
    let resp = app(state).oneshot(get_with_cookie("/api/auth/nav", None)).await.unwrap();

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["logged_in"], false);
    assert!(json["user_id"].is_null());
    assert_eq!(json["links"][0]["label"], "Login");
    assert_eq!(json["links"][1]["href"], "/register");
}

#[tokio::test]
async fn nav_json_logged_in() {
    let (state, store) = memory_state(AppConfig::default());
    let cookie = logged_in_cookie(store.as_ref(), "42").await;
    let resp = app(state).oneshot(get_with_cookie("/api/auth/nav", Some(&cookie))).await.unwrap();

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["logged_in"], true);
    assert_eq!(json["user_id"], "42");
    assert_eq!(json["links"][0]["href"], "/profile/42");
    assert_eq!(json["links"][1]["label"], "Logout");
}

// =============================================================================
// Misc
// =============================================================================

#[tokio::test]
async fn healthz_returns_ok() {
    let (state, _) = memory_state(AppConfig::default());
    let resp = app(state).oneshot(get_with_cookie("/healthz", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (state, _) = memory_state(AppConfig::default());
    let resp = app(state).oneshot(get_with_cookie("/nope", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
