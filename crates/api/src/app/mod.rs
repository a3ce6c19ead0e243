//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared state handed to handlers
//! - `policies.rs`: ownership policy per guarded handler
//! - `routes/`: HTTP routes + handlers (one file per collection)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, http::StatusCode, routing::get};
use chrono::Utc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use booking_auth::{Hs256JwtValidator, RegistryError};
use booking_infra::{RepositoryRegistry, registry::BookingError, seed::seed_demo_data};

use crate::config::ApiConfig;
use crate::middleware;

pub mod errors;
pub mod policies;
pub mod routes;
pub mod services;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid policy table: {0}")]
    Registry(#[from] RegistryError),

    #[error("seeding demo data failed: {0}")]
    Seed(#[from] BookingError),
}

/// Build the full HTTP router over a fresh in-memory store.
pub fn build_app(config: &ApiConfig) -> Result<Router, AppError> {
    let registry = Arc::new(RepositoryRegistry::in_memory());
    if config.seed_demo_data {
        seed_demo_data(&registry, Utc::now())?;
    }
    build_app_with(config, registry)
}

/// Build the router over an existing registry.
///
/// Fails when a registered policy names a collection the registry does not
/// serve, so a misconfigured table never reaches the first request.
pub fn build_app_with(config: &ApiConfig, registry: Arc<RepositoryRegistry>) -> Result<Router, AppError> {
    let policies = policies::policy_table()?;
    let services = Arc::new(services::AppServices::new(registry, policies));

    let jwt = Arc::new(Hs256JwtValidator::new(config.jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid token.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(auth_state, middleware::auth_middleware));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", protected)
        .fallback_service(pages(config))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}

/// Page navigations: the route gate in front of the static site.
fn pages(config: &ApiConfig) -> Router {
    let site = match &config.static_dir {
        Some(dir) => Router::new().fallback_service(ServeDir::new(dir)),
        None => Router::new().fallback(page_not_found),
    };
    site.layer(axum::middleware::from_fn(middleware::route_gate))
}

async fn page_not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "page not found")
}
