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

use booking_auth::{Role, require_role};
use booking_core::{NewUser, UserChanges, UserId};

use crate::app::{errors, policies, services::AppServices};
use crate::authz::ownership_guard;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user.layer(from_fn_with_state(policies::USERS_GET, ownership_guard)))
                .patch(update_user.layer(from_fn_with_state(policies::USERS_UPDATE, ownership_guard)))
                .delete(delete_user.layer(from_fn_with_state(policies::USERS_DELETE, ownership_guard))),
        )
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(e) = require_role(principal.principal(), &Role::ADMIN) {
        return errors::authz_error_to_response(e);
    }
    match services.registry.users().list() {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewUser>,
) -> axum::response::Response {
    if let Err(e) = require_role(principal.principal(), &Role::ADMIN) {
        return errors::authz_error_to_response(e);
    }
    let user = match body.into_user() {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.registry.users().insert(user) {
        Ok(created) => {
            tracing::info!(user_id = %created.id, role = %created.role, "user created");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.registry.users().get(id) {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => errors::not_found("user"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Non-admins may edit their own profile but never their role.
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(changes): Json<UserChanges>,
) -> axum::response::Response {
    let id: UserId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if changes.changes_role() && !principal.is_admin() {
        return errors::forbidden("only administrators can change roles");
    }

    let users = services.registry.users();
    let mut user = match users.get(id) {
        Ok(Some(u)) => u,
        Ok(None) => return errors::not_found("user"),
        Err(e) => return errors::store_error_to_response(e),
    };
    if let Err(e) = changes.apply_to(&mut user) {
        return errors::domain_error_to_response(e);
    }
    match users.replace(user.clone()) {
        Ok(true) => (StatusCode::OK, Json(user)).into_response(),
        Ok(false) => errors::not_found("user"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.registry.delete_user(id) {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => errors::not_found("user"),
        Err(e) => errors::store_error_to_response(e),
    }
}
