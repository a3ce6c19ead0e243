use axum::{Router, routing::get};

pub mod events;
pub mod reservations;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints (mounted under `/api`).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/users", users::router())
        .nest("/events", events::router())
        .nest("/reservations", reservations::router())
}
