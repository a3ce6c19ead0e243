use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
};

use booking_core::{EventChanges, EventId, NewEvent};

use crate::app::{errors, policies, services::AppServices};
use crate::authz::ownership_guard;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/:id",
            // EVENTS_GET carries no policy: any signed-in user may read an event.
            get(get_event.layer(from_fn_with_state(policies::EVENTS_GET, ownership_guard)))
                .patch(update_event.layer(from_fn_with_state(policies::EVENTS_UPDATE, ownership_guard)))
                .delete(delete_event.layer(from_fn_with_state(policies::EVENTS_DELETE, ownership_guard))),
        )
}

pub async fn list_events(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.registry.events().list() {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// The caller becomes the event's organizer (`userId`).
pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewEvent>,
) -> axum::response::Response {
    let Some(organizer) = principal.user_id() else {
        return errors::forbidden("events can only be created by user accounts");
    };
    let event = match body.into_event(organizer) {
        Ok(e) => e,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.registry.events().insert(event) {
        Ok(created) => {
            tracing::info!(event_id = %created.id, organizer = %organizer, "event created");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.registry.events().get(id) {
        Ok(Some(event)) => (StatusCode::OK, Json(event)).into_response(),
        Ok(None) => errors::not_found("event"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Capacity may not drop below the seats already reserved (409).
pub async fn update_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(changes): Json<EventChanges>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.registry.update_event(id, changes) {
        Ok(Some(event)) => (StatusCode::OK, Json(event)).into_response(),
        Ok(None) => errors::not_found("event"),
        Err(e) => errors::booking_error_to_response(e),
    }
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.registry.delete_event(id) {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => errors::not_found("event"),
        Err(e) => errors::store_error_to_response(e),
    }
}
