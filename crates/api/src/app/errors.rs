use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use booking_auth::AuthzError;
use booking_core::DomainError;
use booking_infra::{StoreError, registry::BookingError};

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn forbidden(message: impl Into<String>) -> Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", message)
}

pub fn authz_error_to_response(err: AuthzError) -> Response {
    forbidden(err.to_string())
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

/// Store failures are surfaced as-is; nothing is retried or masked as a denial.
pub fn store_error_to_response(err: StoreError) -> Response {
    tracing::error!(error = %err, "store failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
}

pub fn booking_error_to_response(err: BookingError) -> Response {
    match err {
        BookingError::Domain(e) => domain_error_to_response(e),
        BookingError::Store(e) => store_error_to_response(e),
    }
}

pub fn not_found(what: &str) -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
}

pub fn parse_id<I>(raw: &str) -> Result<I, Response>
where
    I: core::str::FromStr<Err = DomainError>,
{
    raw.parse::<I>().map_err(domain_error_to_response)
}
