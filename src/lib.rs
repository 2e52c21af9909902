//! # authnav
//!
//! Renders the authentication links of a page header (Login / Register for
//! anonymous visitors, Profile / Logout for logged-in ones) from the visitor's
//! session.
//!
//! The `ssr` feature (default) builds the Axum service that resolves the
//! session cookie and serves the Leptos page shell through `leptos_axum`. The
//! `hydrate` feature builds the wasm entry that mounts the same link set in
//! the browser once the DOM is ready. `app`, `nav` and `toggle` are shared by
//! both.

pub mod app;
pub mod nav;
pub mod toggle;

#[cfg(feature = "hydrate")]
pub mod hydrate;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod routes;
#[cfg(feature = "ssr")]
pub mod services;
#[cfg(feature = "ssr")]
pub mod state;
