//! Auth navigation link sets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared by the server renderer and the wasm toggle. Both sides pick the
//! link set here so a pre-rendered page and a hydrated page never disagree
//! about which links a visitor sees. Markup lives in `crate::app`.
//!
//! DESIGN
//! ======
//! The visitor is either anonymous (Login / Register) or logged in
//! (Profile / Logout). Link targets belong to the surrounding application and
//! arrive as `NavPaths`; the profile target is a template carrying the
//! `{user_id}` placeholder.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Class of the element whose content holds the auth links.
pub const AUTH_CONTAINER_CLASS: &str = "auth-buttons";

/// Selector matching [`AUTH_CONTAINER_CLASS`].
pub const AUTH_CONTAINER_SELECTOR: &str = ".auth-buttons";

/// Element id of the embedded JSON bootstrap payload.
pub const BOOTSTRAP_SCRIPT_ID: &str = "authnav-bootstrap";

/// Placeholder substituted with the user id in the profile path.
pub const USER_ID_PLACEHOLDER: &str = "{user_id}";

const LABEL_LOGIN: &str = "Login";
const LABEL_REGISTER: &str = "Register";
const LABEL_PROFILE: &str = "Profile";
const LABEL_LOGOUT: &str = "Logout";

// =============================================================================
// AUTH STATE
// =============================================================================

/// Whether the current visitor has an active logged-in session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Anonymous,
    LoggedIn { user_id: String },
}

impl AuthState {
    #[must_use]
    pub fn logged_in(user_id: impl Into<String>) -> Self {
        Self::LoggedIn { user_id: user_id.into() }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::LoggedIn { user_id } => Some(user_id),
        }
    }
}

// =============================================================================
// NAV PATHS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavPathsError {
    #[error("{field} path is empty")]
    Empty { field: &'static str },

    #[error("{field} path must start with a single '/' or http(s)://, got {value:?}")]
    NotAbsolute { field: &'static str, value: String },

    #[error("profile path {0:?} must contain the {{user_id}} placeholder")]
    MissingPlaceholder(String),
}

/// Link targets owned by the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavPaths {
    pub login: String,
    pub register: String,
    /// Template; `{user_id}` is replaced with the percent-encoded user id.
    pub profile: String,
    pub logout: String,
}

impl Default for NavPaths {
    fn default() -> Self {
        Self {
            login: "/login".into(),
            register: "/register".into(),
            profile: format!("/profile/{USER_ID_PLACEHOLDER}"),
            logout: "/logout".into(),
        }
    }
}

impl NavPaths {
    /// Check every path is usable as a link target.
    ///
    /// # Errors
    ///
    /// Returns the first path that is empty or relative, or a profile template
    /// without the `{user_id}` placeholder.
    pub fn validate(&self) -> Result<(), NavPathsError> {
        for (field, value) in [
            ("login", &self.login),
            ("register", &self.register),
            ("profile", &self.profile),
            ("logout", &self.logout),
        ] {
            if value.trim().is_empty() {
                return Err(NavPathsError::Empty { field });
            }
            if !is_absolute_target(value) {
                return Err(NavPathsError::NotAbsolute { field, value: value.clone() });
            }
        }

        if !self.profile.contains(USER_ID_PLACEHOLDER) {
            return Err(NavPathsError::MissingPlaceholder(self.profile.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn profile_href(&self, user_id: &str) -> String {
        self.profile
            .replace(USER_ID_PLACEHOLDER, &encode_path_segment(user_id))
    }
}

/// Rooted path or explicit http(s) URL. `//host` is protocol-relative and
/// would leave the site, so it is rejected.
fn is_absolute_target(value: &str) -> bool {
    (value.starts_with('/') && !value.starts_with("//"))
        || value.starts_with("https://")
        || value.starts_with("http://")
}

// =============================================================================
// LINKS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    fn new(label: &str, href: impl Into<String>) -> Self {
        Self { label: label.to_owned(), href: href.into() }
    }
}

/// Pick the link set for the given auth state.
#[must_use]
pub fn links_for(state: &AuthState, paths: &NavPaths) -> Vec<NavLink> {
    match state {
        AuthState::LoggedIn { user_id } => vec![
            NavLink::new(LABEL_PROFILE, paths.profile_href(user_id)),
            NavLink::new(LABEL_LOGOUT, paths.logout.clone()),
        ],
        AuthState::Anonymous => vec![
            NavLink::new(LABEL_LOGIN, paths.login.clone()),
            NavLink::new(LABEL_REGISTER, paths.register.clone()),
        ],
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub(crate) fn encode_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

// =============================================================================
// BOOTSTRAP PAYLOAD
// =============================================================================

/// State handed from the server-rendered page to the wasm toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavBootstrap {
    pub auth: AuthState,
    #[serde(default)]
    pub paths: NavPaths,
}

impl NavBootstrap {
    /// Serialize for embedding inside a `<script type="application/json">`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(json
            .replace('&', "\\u0026")
            .replace('<', "\\u003c")
            .replace('>', "\\u003e"))
    }

    /// Parse the embedded payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid bootstrap JSON.
    pub fn from_script_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.trim())
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
