use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use booking_auth::{GateDecision, JwtValidator, gate};

use crate::context::PrincipalContext;

/// Cookie carrying the session token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Resolve the caller from a bearer token (or the session cookie) and attach
/// a [`PrincipalContext`] to the request.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())
        .or_else(|| cookie_value(req.headers(), ACCESS_TOKEN_COOKIE))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "rejected token");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut()
        .insert(PrincipalContext::new(claims.principal()));

    Ok(next.run(req).await)
}

/// Redirect page navigations according to session-cookie presence.
///
/// The cookie's value is never verified here; an empty value counts as absent.
pub async fn route_gate(req: Request, next: Next) -> Response {
    let has_credential = cookie_value(req.headers(), ACCESS_TOKEN_COOKIE).is_some();

    match gate(req.uri().path(), has_credential) {
        GateDecision::PassThrough => next.run(req).await,
        GateDecision::Redirect(to) => {
            tracing::debug!(path = %req.uri().path(), to, "route gate redirect");
            Redirect::temporary(to).into_response()
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// First non-empty value of cookie `name` across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}
