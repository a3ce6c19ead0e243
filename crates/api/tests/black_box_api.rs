use std::sync::Arc;

use booking_api::config::ApiConfig;
use booking_auth::{JwtClaims, PrincipalId, Role};
use booking_infra::{RepositoryRegistry, seed::seed_demo_data};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

const JWT_SECRET: &str = "test-secret";

// Seeded ids: user 1 is ADMIN; user 2 organizes events 1 and 2; user 3
// organizes event 3 and holds reservation 1 on event 1.
const ADMIN: i64 = 1;
const YASMINE: i64 = 2;
const LOUIS: i64 = 3;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, over a seeded store, on an ephemeral port.
        let registry = Arc::new(RepositoryRegistry::in_memory());
        seed_demo_data(&registry, Utc::now()).expect("seed");
        let app = booking_api::app::build_app_with(&ApiConfig::new(JWT_SECRET), registry)
            .expect("failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn mint_jwt(sub: PrincipalId, role: Role) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub,
        role,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn user_token(id: i64) -> String {
    mint_jwt(PrincipalId::Numeric(id), Role::USER)
}

fn admin_token() -> String {
    mint_jwt(PrincipalId::Numeric(ADMIN), Role::ADMIN)
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = client().get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client.get(srv.url("/api/whoami")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(srv.url("/api/events"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn principal_is_derived_from_token_or_cookie() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(srv.url("/api/whoami"))
        .bearer_auth(user_token(YASMINE))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"], json!(YASMINE));
    assert_eq!(body["role"], json!("USER"));

    let res = client
        .get(srv.url("/api/whoami"))
        .header("cookie", format!("access_token={}", admin_token()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["admin"], json!(true));
}

#[tokio::test]
async fn organizer_can_update_own_event_but_not_others() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .patch(srv.url("/api/events/1"))
        .bearer_auth(user_token(YASMINE))
        .json(&json!({ "title": "Gnaoua Night (extended)" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["title"], json!("Gnaoua Night (extended)"));

    let res = client
        .patch(srv.url("/api/events/1"))
        .bearer_auth(user_token(LOUIS))
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], json!("Access denied"));
}

#[tokio::test]
async fn missing_and_non_numeric_ids_are_denied_for_users() {
    let srv = TestServer::spawn().await;
    let client = client();

    for path in ["/api/events/999", "/api/events/abc", "/api/events/1.5"] {
        let res = client
            .delete(srv.url(path))
            .bearer_auth(user_token(YASMINE))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
async fn admin_bypasses_ownership() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(srv.url("/api/reservations/1"))
        .bearer_auth(admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Past the guard, the handler reports what it finds.
    let res = client
        .delete(srv.url("/api/events/999"))
        .bearer_auth(admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn numeric_subject_does_not_match_string_subject() {
    let srv = TestServer::spawn().await;

    // Same digits, different JSON type: the owner check is strict.
    let token = mint_jwt(PrincipalId::Opaque(YASMINE.to_string()), Role::USER);
    let res = client()
        .get(srv.url("/api/users/2"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn event_reads_are_open_to_any_signed_in_user() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(srv.url("/api/events/1"))
        .bearer_auth(user_token(LOUIS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["userId"], json!(YASMINE));

    // Unguarded handler: a bad id is the handler's 400, not a denial.
    let res = client
        .get(srv.url("/api/events/abc"))
        .bearer_auth(user_token(LOUIS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_can_read_own_profile_but_not_change_role() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(srv.url("/api/users/3"))
        .bearer_auth(user_token(LOUIS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(srv.url("/api/users/2"))
        .bearer_auth(user_token(LOUIS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .patch(srv.url("/api/users/3"))
        .bearer_auth(user_token(LOUIS))
        .json(&json!({ "role": "ADMIN" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/api/users"))
        .bearer_auth(user_token(LOUIS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/api/users"))
        .bearer_auth(admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn reservations_respect_capacity_and_ownership() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .post(srv.url("/api/events"))
        .bearer_auth(user_token(YASMINE))
        .json(&json!({
            "title": "Small room",
            "location": "Tangier",
            "startsAt": "2030-01-01T20:00:00Z",
            "capacity": 2
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let event: serde_json::Value = res.json().await.unwrap();
    assert_eq!(event["userId"], json!(YASMINE));
    let event_id = event["id"].as_i64().unwrap();

    let res = client
        .post(srv.url("/api/reservations"))
        .bearer_auth(user_token(LOUIS))
        .json(&json!({ "eventId": event_id, "seats": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let reservation: serde_json::Value = res.json().await.unwrap();
    let reservation_id = reservation["id"].as_i64().unwrap();

    let res = client
        .post(srv.url("/api/reservations"))
        .bearer_auth(user_token(YASMINE))
        .json(&json!({ "eventId": event_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .delete(srv.url(&format!("/api/reservations/{reservation_id}")))
        .bearer_auth(user_token(YASMINE))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(srv.url(&format!("/api/reservations/{reservation_id}")))
        .bearer_auth(user_token(LOUIS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url("/api/reservations"))
        .bearer_auth(user_token(LOUIS))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert!(items.iter().all(|r| r["userId"] == json!(LOUIS)));
}

#[tokio::test]
async fn page_navigation_goes_through_route_gate() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client.get(srv.url("/dashboard")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/login");

    let res = client
        .get(srv.url("/login"))
        .header("cookie", "access_token=whatever")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/");

    // Anonymous visitors may see the login page itself.
    let res = client.get(srv.url("/login")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_and_static_paths_are_never_redirected() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client.get(srv.url("/api/events")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    for path in ["/favicon.ico", "/_next/static/app.js", "/public/logo.svg", "/"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_ne!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
    }
}

#[tokio::test]
async fn capacity_cannot_shrink_below_reserved_seats() {
    let srv = TestServer::spawn().await;
    let client = client();

    // Event 1 already has 2 seats reserved.
    let res = client
        .patch(srv.url("/api/events/1"))
        .bearer_auth(user_token(YASMINE))
        .json(&json!({ "capacity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], json!("conflict"));

    let res = client
        .patch(srv.url("/api/events/1"))
        .bearer_auth(user_token(YASMINE))
        .json(&json!({ "capacity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
