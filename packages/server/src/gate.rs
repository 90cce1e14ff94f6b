//! Redirect-only session gate for browser pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::extractors::auth::session_claims;
use crate::state::AppState;

pub const SIGN_IN_PATH: &str = "/auth/signin";
pub const DASHBOARD_PATH: &str = "/dashboard";

const PROTECTED_PREFIX: &str = "/dashboard";
const AUTH_PREFIX: &str = "/auth";

/// Paths the gate never looks at.
const SKIPPED_PREFIXES: &[&str] = &[
    "/api",
    "/swagger-ui",
    "/scalar",
    "/api-docs",
    "/static",
    "/favicon.ico",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(&'static str),
}

/// Decide what happens to a page request.
///
/// Protected pages need a session; sign-in pages are pointless with one.
pub fn route_decision(path: &str, has_session: bool) -> GateDecision {
    if SKIPPED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return GateDecision::Continue;
    }
    if path.starts_with(PROTECTED_PREFIX) && !has_session {
        return GateDecision::Redirect(SIGN_IN_PATH);
    }
    if path.starts_with(AUTH_PREFIX) && has_session {
        return GateDecision::Redirect(DASHBOARD_PATH);
    }
    GateDecision::Continue
}

pub async fn session_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let has_session = session_claims(req.headers(), &state).is_some();
    match route_decision(req.uri().path(), has_session) {
        GateDecision::Continue => next.run(req).await,
        GateDecision::Redirect(target) => {
            tracing::debug!(path = %req.uri().path(), redirect = target, "Session gate redirect");
            Redirect::to(target).into_response()
        }
    }
}
