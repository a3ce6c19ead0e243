//! Page route gate.
//!
//! Unauthenticated visitors only see the root page and the login family;
//! authenticated visitors never see the login family. Only the presence of
//! the session cookie is considered, never its validity.

/// Pages belonging to the authentication flow.
pub const AUTH_PAGE_PREFIXES: [&str; 5] = [
    "/login",
    "/register",
    "/resetPassword",
    "/verification-email",
    "/envoicode",
];

/// Path heads (after the leading `/`) that the gate never intercepts.
pub const EXCLUDED_PREFIXES: [&str; 5] = ["api", "_next/static", "_next/image", "favicon.ico", "public"];

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    PassThrough,
    Redirect(&'static str),
}

/// Whether the gate applies to `path` at all.
///
/// Exclusions match on the text right after the leading slash, so
/// `/api/events` and `/apidocs` are both excluded.
pub fn is_intercepted(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    !EXCLUDED_PREFIXES.iter().any(|prefix| rest.starts_with(prefix))
}

pub fn is_auth_page(path: &str) -> bool {
    AUTH_PAGE_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Redirect decision for an intercepted path.
pub fn decide(path: &str, has_credential: bool) -> GateDecision {
    let auth_page = is_auth_page(path);

    if auth_page && has_credential {
        GateDecision::Redirect(HOME)
    } else if !auth_page && !has_credential && path != HOME {
        GateDecision::Redirect(LOGIN)
    } else {
        GateDecision::PassThrough
    }
}

/// Full gate: matcher exclusion first, then [`decide`].
pub fn gate(path: &str, has_credential: bool) -> GateDecision {
    if is_intercepted(path) {
        decide(path, has_credential)
    } else {
        GateDecision::PassThrough
    }
}
