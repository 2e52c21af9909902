//! Leptos views for the auth navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` and `App` are rendered on the server through `leptos_axum`; the
//! page context (title plus bootstrap payload) is provided per request by
//! `routes::pages::home`. `AuthLinks` is the piece both sides share: the
//! server renders it inside the auth container and the wasm toggle mounts it
//! into the same container once the DOM is ready.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};

use crate::nav::{AUTH_CONTAINER_CLASS, AuthState, BOOTSTRAP_SCRIPT_ID, NavBootstrap, NavLink, NavPaths, links_for};

/// Name of the wasm bundle under `/pkg` (`/pkg/authnav.js`).
pub const PKG_OUTPUT_NAME: &str = "authnav";

/// Per-request data the page shell renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub title: String,
    pub bootstrap: NavBootstrap,
}

/// Leptos options for the page shell; the bundle is served from `/pkg`.
#[must_use]
pub fn leptos_options() -> LeptosOptions {
    LeptosOptions::builder()
        .output_name(PKG_OUTPUT_NAME)
        .site_pkg_dir("pkg")
        .build()
}

/// HTML shell rendered on the server.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Page body: site header with the auth container, plus the bootstrap
/// payload the wasm toggle reads back.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let page = use_context::<PageContext>().unwrap_or_default();
    let payload = page.bootstrap.to_script_json().unwrap_or_else(|e| {
        tracing::error!(error = %e, "auth bootstrap serialization failed");
        String::new()
    });
    let title = page.title;

    view! {
        <Title text=title.clone()/>
        <header class="site-header">
            <a class="site-brand" href="/">{title}</a>
            <AuthButtons auth=page.bootstrap.auth paths=page.bootstrap.paths/>
        </header>
        <main></main>
        <script type="application/json" id=BOOTSTRAP_SCRIPT_ID inner_html=payload></script>
    }
}

/// The auth container with the link set for `auth`.
#[component]
pub fn AuthButtons(auth: AuthState, paths: NavPaths) -> impl IntoView {
    let links = links_for(&auth, &paths);
    view! {
        <nav class=AUTH_CONTAINER_CLASS>
            <AuthLinks links/>
        </nav>
    }
}

/// Anchors for one link set; the inner content of the auth container.
#[component]
pub fn AuthLinks(links: Vec<NavLink>) -> impl IntoView {
    links
        .into_iter()
        .map(|link| view! { <a href=link.href>{link.label}</a> })
        .collect_view()
}

/// Server-rendered markup of a link set.
#[must_use]
pub fn links_markup(links: Vec<NavLink>) -> String {
    view! { <AuthLinks links/> }.to_html()
}

/// Markup of the link set for `state`, as served by the auth partial.
#[must_use]
pub fn render_links(state: &AuthState, paths: &NavPaths) -> String {
    links_markup(links_for(state, paths))
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
