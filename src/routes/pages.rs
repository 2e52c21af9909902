//! Page shell, auth link partial, and nav JSON.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every response here depends on the session cookie, so all of them carry
//! `Cache-Control: no-store` and `Vary: Cookie`. The page shell is the Leptos
//! `shell` rendered through `leptos_axum`, with the session resolved before
//! rendering and handed in as `PageContext`. The auth container is filled on
//! first paint, before (or without) the wasm toggle.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::{Html, IntoResponse, Json, Response};
use leptos::prelude::provide_context;
use serde::Serialize;

use super::auth::SessionAuth;
use crate::app::{PageContext, render_links, shell};
use crate::nav::{NavLink, links_for};
use crate::state::AppState;

const NO_STORE: [(&str, &str); 2] = [("cache-control", "no-store"), ("vary", "Cookie")];

/// `GET /`: page shell with the auth links already in place.
pub async fn home(State(state): State<AppState>, auth: SessionAuth, req: Request<Body>) -> Response {
    let page = PageContext {
        title: state.config.site_title.clone(),
        bootstrap: state.bootstrap(auth.auth_state()),
    };
    let options = state.leptos_options.clone();

    let handler = leptos_axum::render_app_to_stream_with_context(
        move || provide_context(page.clone()),
        move || shell(options.clone()),
    );
    (NO_STORE, handler(req).await).into_response()
}

/// `GET /partials/auth-buttons`: inner markup of the auth container.
pub async fn auth_buttons(State(state): State<AppState>, auth: SessionAuth) -> Response {
    let html = render_links(&auth.auth_state(), &state.config.nav_paths);
    (NO_STORE, Html(html)).into_response()
}

#[derive(Debug, Serialize)]
pub struct NavResponse {
    pub logged_in: bool,
    pub user_id: Option<String>,
    pub links: Vec<NavLink>,
}

/// `GET /api/auth/nav`: auth state and link set as JSON.
pub async fn nav(State(state): State<AppState>, auth: SessionAuth) -> Response {
    let auth_state = auth.auth_state();
    let body = NavResponse {
        logged_in: auth_state.is_logged_in(),
        user_id: auth_state.user_id().map(str::to_owned),
        links: links_for(&auth_state, &state.config.nav_paths),
    };
    (NO_STORE, Json(body)).into_response()
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
