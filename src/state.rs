//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed config and the session store every request consults to
//! decide which auth links to render.

use std::sync::Arc;

use leptos::config::LeptosOptions;

use crate::app::leptos_options;
use crate::config::AppConfig;
use crate::nav::{AuthState, NavBootstrap};
use crate::services::session::SessionStore;

/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<dyn SessionStore>,
    pub leptos_options: LeptosOptions,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self { config: Arc::new(config), sessions, leptos_options: leptos_options() }
    }

    /// Bootstrap payload for a visitor in `auth` state.
    #[must_use]
    pub fn bootstrap(&self, auth: AuthState) -> NavBootstrap {
        NavBootstrap { auth, paths: self.config.nav_paths.clone() }
    }
}
