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
use chrono::Utc;

use booking_core::{NewReservation, ReservationId};

use crate::app::{errors, policies, services::AppServices};
use crate::authz::ownership_guard;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route(
            "/:id",
            get(get_reservation.layer(from_fn_with_state(policies::RESERVATIONS_GET, ownership_guard)))
                .delete(delete_reservation.layer(from_fn_with_state(
                    policies::RESERVATIONS_DELETE,
                    ownership_guard,
                ))),
        )
}

/// Admins see every reservation, everyone else only their own.
pub async fn list_reservations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let all = match services.registry.reservations().list() {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let items = if principal.is_admin() {
        all
    } else {
        let me = principal.user_id();
        all.into_iter().filter(|r| Some(r.user_id) == me).collect()
    };
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_reservation(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewReservation>,
) -> axum::response::Response {
    let Some(holder) = principal.user_id() else {
        return errors::forbidden("reservations can only be made by user accounts");
    };
    match services.registry.reserve(body, holder, Utc::now()) {
        Ok(created) => {
            tracing::info!(
                reservation_id = %created.id,
                event_id = %created.event_id,
                seats = created.seats,
                "reservation created"
            );
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => errors::booking_error_to_response(e),
    }
}

pub async fn get_reservation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ReservationId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.registry.reservations().get(id) {
        Ok(Some(r)) => (StatusCode::OK, Json(r)).into_response(),
        Ok(None) => errors::not_found("reservation"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_reservation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ReservationId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.registry.reservations().delete(id) {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => errors::not_found("reservation"),
        Err(e) => errors::store_error_to_response(e),
    }
}
