//! Per-handler ownership guard.
//!
//! Mounted on individual handlers with
//! `handler.layer(from_fn_with_state(HANDLER_ID, ownership_guard))` so the
//! check runs after routing (the `id` path parameter is known) and before
//! the handler body.

use std::sync::Arc;

use axum::{
    extract::{RawPathParams, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use booking_auth::{AccessDecision, HandlerId, evaluate};
use booking_core::LookupId;

use crate::app::errors::{forbidden, json_error, store_error_to_response};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// Path parameter holding the targeted record id.
pub const ID_PARAM: &str = "id";

/// Let the request through, or answer 403 "Access denied".
///
/// A non-numeric `id` is not rejected here; it becomes a NaN lookup which
/// never matches a record. Store failures become 500s, never denials.
pub async fn ownership_guard(
    State(handler): State<HandlerId>,
    params: Option<RawPathParams>,
    req: Request,
    next: Next,
) -> Response {
    let Some(services) = req.extensions().get::<Arc<AppServices>>().cloned() else {
        tracing::error!(%handler, "ownership guard mounted without app services");
        return json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "misconfigured",
            "services unavailable",
        );
    };
    let Some(principal) = req.extensions().get::<PrincipalContext>().cloned() else {
        return json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required");
    };

    let requested = params
        .as_ref()
        .and_then(|p| p.iter().find(|(key, _)| *key == ID_PARAM))
        .map(|(_, value)| LookupId::parse(value))
        .unwrap_or(LookupId::NotANumber);

    let decision = evaluate(
        services.policies.get(handler),
        principal.principal(),
        requested,
        services.registry.as_ref(),
    )
    .await;

    match decision {
        Ok(AccessDecision::Allow) => next.run(req).await,
        Ok(AccessDecision::Deny(reason)) => {
            tracing::debug!(
                %handler,
                principal = %principal.id(),
                id = %requested,
                %reason,
                "ownership check denied"
            );
            forbidden(reason.message())
        }
        Err(e) => store_error_to_response(e),
    }
}
