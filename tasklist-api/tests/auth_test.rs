/// Authentication endpoint integration tests
///
/// These go through real Argon2id hashing, so they are slower than the
/// other suites.

mod common;

use axum::http::{header, StatusCode};
use common::TestContext;
use serde_json::json;
use tasklist_shared::auth::session::{open_session, ClientInfo};
use tasklist_shared::store::Store;

async fn sign_up(ctx: &TestContext, email: &str, password: &str) -> common::TestResponse {
    ctx.send_json(
        "POST",
        "/api/auth/sign-up/email",
        None,
        json!({ "email": email, "password": password, "name": "Alice" }),
    )
    .await
}

#[tokio::test]
async fn test_sign_up_opens_session() {
    let ctx = TestContext::new();

    let response = sign_up(&ctx, "Alice@Example.com", "password123").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["is_admin"], false);
    assert!(body["session"]["token_hash"].is_null());
    assert!(body.get("token").is_none());

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(!set_cookie.contains("Secure"));

    let cookie = response.session_cookie().unwrap();
    let session = ctx.get("/api/auth/get-session", Some(&cookie)).await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.json()["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let ctx = TestContext::new();

    assert_eq!(sign_up(&ctx, "alice@example.com", "password123").await.status, StatusCode::OK);

    let duplicate = sign_up(&ctx, "ALICE@example.com", "password456").await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.json()["message"], "Email already exists");
}

#[tokio::test]
async fn test_sign_up_validation() {
    let ctx = TestContext::new();

    let response = ctx
        .send_json(
            "POST",
            "/api/auth/sign-up/email",
            None,
            json!({ "email": "nope", "password": "short", "name": "" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = response.json()["details"].as_array().unwrap().clone();
    let fields: Vec<&str> = details.iter().map(|d| d["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["email", "name", "password"]);
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_sign_in() {
    let ctx = TestContext::new();
    sign_up(&ctx, "alice@example.com", "password123").await;

    let wrong = ctx
        .send_json(
            "POST",
            "/api/auth/sign-in/email",
            None,
            json!({ "email": "alice@example.com", "password": "password124" }),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json()["message"], "Invalid email or password");

    let unknown = ctx
        .send_json(
            "POST",
            "/api/auth/sign-in/email",
            None,
            json!({ "email": "nobody@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json()["message"], "Invalid email or password");

    let ok = ctx
        .send_json(
            "POST",
            "/api/auth/sign-in/email",
            None,
            json!({ "email": " alice@example.com ", "password": "password123" }),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let cookie = ok.session_cookie().unwrap();
    assert_eq!(ctx.get("/api/todos", Some(&cookie)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_prunes_expired_sessions() {
    let ctx = TestContext::new();
    sign_up(&ctx, "alice@example.com", "password123").await;
    let user = ctx
        .store
        .find_user_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();

    open_session(&ctx.store, user.id, chrono::Duration::hours(-1), ClientInfo::default())
        .await
        .unwrap();
    assert_eq!(ctx.store.session_count().await, 2);

    ctx.send_json(
        "POST",
        "/api/auth/sign-in/email",
        None,
        json!({ "email": "alice@example.com", "password": "password123" }),
    )
    .await;

    assert_eq!(ctx.store.session_count().await, 2);
}

#[tokio::test]
async fn test_sign_out_invalidates_session() {
    let ctx = TestContext::new();
    let alice = ctx.create_user("alice@example.com", "Alice").await;
    let cookie = ctx.sign_in_as(&alice).await;

    let response = ctx
        .send_json("POST", "/api/auth/sign-out", Some(&cookie), json!({}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "success": true }));

    let cleared = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.starts_with("tasklist.session_token="));
    assert!(cleared.contains("Max-Age=0"));

    assert_eq!(
        ctx.get("/api/todos", Some(&cookie)).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(ctx.get("/api/auth/get-session", Some(&cookie)).await.body, "null");
}

#[tokio::test]
async fn test_sign_out_without_session() {
    let ctx = TestContext::new();

    let response = ctx
        .send_json("POST", "/api/auth/sign-out", None, json!({}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["success"], true);
}

#[tokio::test]
async fn test_expired_session_rejected() {
    let ctx = TestContext::new();
    let alice = ctx.create_user("alice@example.com", "Alice").await;

    let opened = open_session(
        &ctx.store,
        alice.id,
        chrono::Duration::seconds(-1),
        ClientInfo::default(),
    )
    .await
    .unwrap();
    let cookie = format!("{}={}", common::COOKIE_NAME, opened.token);

    assert_eq!(
        ctx.get("/api/todos", Some(&cookie)).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(ctx.get("/api/auth/get-session", Some(&cookie)).await.body, "null");

    let admin_page = ctx.get("/admin", Some(&cookie)).await;
    assert_eq!(admin_page.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_secure_cookie_in_production() {
    let mut config = common::test_config();
    config.api.production = true;
    let ctx = TestContext::with_config(config);

    let response = sign_up(&ctx, "alice@example.com", "password123").await;
    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Secure"));
    assert!(response.headers.get("strict-transport-security").is_some());
}

#[tokio::test]
async fn test_sign_up_with_longest_session_ttl() {
    let mut config = common::test_config();
    config.session.ttl_hours = tasklist_api::config::MAX_SESSION_TTL_HOURS;
    let ctx = TestContext::with_config(config);

    let response = sign_up(&ctx, "alice@example.com", "password123").await;
    assert_eq!(response.status, StatusCode::OK);

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=315360000"));
}
