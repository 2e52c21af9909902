//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the Leptos page shell, the auth link partial and JSON endpoints, the
//! development session bootstrap, and the static wasm bundle under `/pkg`
//! into a single Axum router.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use any_spawner::Executor;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    // Leptos SSR spawns onto tokio; a second init is a harmless error.
    let _ = Executor::init_tokio();
    let pkg = ServeDir::new(&state.config.pkg_dir);

    Router::new()
        .route("/", get(pages::home))
        .route("/partials/auth-buttons", get(pages::auth_buttons))
        .route("/api/auth/nav", get(pages::nav))
        .route("/api/dev/session", post(auth::dev_login).delete(auth::dev_logout))
        .route("/healthz", get(healthz))
        .nest_service("/pkg", pkg)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
