//! Page-load auth link toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once when the document is ready: reads the auth state embedded by the
//! server, then mounts the matching link set into the auth container. The page
//! is reached through `PageDom`; the browser binding (`crate::hydrate`) mounts
//! `crate::app::AuthLinks` with Leptos, and tests use an in-memory page.
//!
//! TRADE-OFFS
//! ==========
//! A missing container or unreadable payload never aborts the page. The former
//! is logged and skipped, the latter renders the anonymous link set, which is
//! the safe default for a visitor whose state we cannot confirm.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::nav::{AUTH_CONTAINER_SELECTOR, BOOTSTRAP_SCRIPT_ID, NavBootstrap, NavLink, NavPaths, links_for};

/// The slice of a document the toggle needs.
pub trait PageDom {
    /// Text content of the element with the given id.
    fn text_by_id(&self, id: &str) -> Option<String>;

    /// Replace the content of the first element matching `selector` with
    /// `links`. Returns `false` when no element matches.
    fn mount_links(&self, selector: &str, links: Vec<NavLink>) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Rendered { logged_in: bool },
    MissingContainer,
    AlreadyRan,
}

/// One-shot renderer for the auth container.
#[derive(Debug)]
pub struct AuthNavToggle {
    selector: String,
    ran: AtomicBool,
}

impl Default for AuthNavToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthNavToggle {
    #[must_use]
    pub fn new() -> Self {
        Self::with_selector(AUTH_CONTAINER_SELECTOR)
    }

    #[must_use]
    pub fn with_selector(selector: impl Into<String>) -> Self {
        Self { selector: selector.into(), ran: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[must_use]
    pub fn has_run(&self) -> bool {
        self.ran.load(Ordering::Acquire)
    }

    /// Read the embedded bootstrap payload and render it into the page.
    pub fn run(&self, page: &impl PageDom) -> ToggleOutcome {
        if self.claim() {
            let bootstrap = read_bootstrap(page);
            self.render(page, &bootstrap)
        } else {
            ToggleOutcome::AlreadyRan
        }
    }

    /// Render an explicitly supplied state, skipping the embedded payload.
    pub fn run_with(&self, page: &impl PageDom, bootstrap: &NavBootstrap) -> ToggleOutcome {
        if self.claim() { self.render(page, bootstrap) } else { ToggleOutcome::AlreadyRan }
    }

    fn claim(&self) -> bool {
        let first = !self.ran.swap(true, Ordering::AcqRel);
        if !first {
            tracing::debug!(selector = %self.selector, "auth nav toggle already ran");
        }
        first
    }

    fn render(&self, page: &impl PageDom, bootstrap: &NavBootstrap) -> ToggleOutcome {
        let links = links_for(&bootstrap.auth, &bootstrap.paths);
        if !page.mount_links(&self.selector, links) {
            tracing::warn!(selector = %self.selector, "auth container not found; leaving page untouched");
            return ToggleOutcome::MissingContainer;
        }

        let logged_in = bootstrap.auth.is_logged_in();
        tracing::debug!(logged_in, "auth nav rendered");
        ToggleOutcome::Rendered { logged_in }
    }
}

/// Read the server-embedded payload, falling back to an anonymous visitor.
pub fn read_bootstrap(page: &impl PageDom) -> NavBootstrap {
    let Some(raw) = page.text_by_id(BOOTSTRAP_SCRIPT_ID) else {
        tracing::warn!(id = BOOTSTRAP_SCRIPT_ID, "auth bootstrap payload missing; rendering anonymous links");
        return NavBootstrap::default();
    };

    let mut bootstrap = match NavBootstrap::from_script_json(&raw) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "auth bootstrap payload unreadable; rendering anonymous links");
            return NavBootstrap::default();
        }
    };

    if let Err(e) = bootstrap.paths.validate() {
        tracing::warn!(error = %e, "auth bootstrap paths invalid; using defaults");
        bootstrap.paths = NavPaths::default();
    }
    bootstrap
}

#[cfg(test)]
#[path = "toggle_test.rs"]
mod tests;
