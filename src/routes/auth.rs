//! Session cookie resolution and the development session bootstrap.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::nav::AuthState;
use crate::services::session::SessionUser;
use crate::state::AppState;

const DEV_USER_ID: &str = "dev";
const DEV_USER_NAME: &str = "Dev User";

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Visitor identity resolved from the session cookie.
///
/// Never rejects: a missing, unknown or expired cookie, or a failing store,
/// all resolve to an anonymous visitor so pages keep rendering.
#[derive(Debug, Default)]
pub struct SessionAuth {
    pub user: Option<SessionUser>,
    /// Raw cookie token, present whenever the cookie was sent.
    pub token: Option<String>,
}

impl SessionAuth {
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.user
            .as_ref()
            .map_or(AuthState::Anonymous, SessionUser::auth_state)
    }
}

impl<S> axum::extract::FromRequestParts<S> for SessionAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar
            .get(&app_state.config.cookie_name)
            .map(Cookie::value)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
        else {
            return Ok(Self::default());
        };

        let user = match app_state.sessions.lookup(&token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "session lookup failed; treating visitor as anonymous");
                None
            }
        };

        Ok(Self { user, token: Some(token) })
    }
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let max_age = i64::try_from(state.config.session_ttl.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((state.config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(Duration::seconds(max_age))
        .build()
}

fn cleared_session_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// DEV SESSION HANDLERS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct DevLoginRequest {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Parse an optional JSON body; an empty body means "use defaults".
pub(crate) fn parse_dev_login(body: &[u8]) -> Result<SessionUser, String> {
    let req: DevLoginRequest = if body.iter().all(u8::is_ascii_whitespace) {
        DevLoginRequest::default()
    } else {
        serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {e}"))?
    };

    let user_id = req.user_id.unwrap_or_else(|| DEV_USER_ID.to_owned());
    if user_id.trim().is_empty() {
        return Err("user_id must not be empty".into());
    }
    let name = req.name.unwrap_or_else(|| DEV_USER_NAME.to_owned());
    Ok(SessionUser { user_id, name })
}

/// `POST /api/dev/session`: create a session without the real login flow.
///
/// Enabled only when `DEV_AUTH_BYPASS=true`.
pub async fn dev_login(State(state): State<AppState>, body: Bytes) -> Response {
    if !state.config.dev_auth_bypass {
        return StatusCode::NOT_FOUND.into_response();
    }

    let user = match parse_dev_login(&body) {
        Ok(user) => user,
        Err(msg) => return (StatusCode::BAD_REQUEST, msg).into_response(),
    };

    let token = match state.sessions.create(&user).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "dev session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session").into_response();
        }
    };

    tracing::info!(user_id = %user.user_id, "dev session created");
    let jar = CookieJar::new().add(session_cookie(&state, token));
    (StatusCode::CREATED, jar, Json(user)).into_response()
}

/// `DELETE /api/dev/session`: revoke the current session and clear the cookie.
pub async fn dev_logout(State(state): State<AppState>, auth: SessionAuth) -> Response {
    if !state.config.dev_auth_bypass {
        return StatusCode::NOT_FOUND.into_response();
    }

    if let Some(token) = auth.token.as_deref() {
        if let Err(e) = state.sessions.revoke(token).await {
            tracing::error!(error = %e, "dev session revoke failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to revoke session").into_response();
        }
    }

    let jar = CookieJar::new().add(cleared_session_cookie(&state));
    (jar, StatusCode::NO_CONTENT).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
