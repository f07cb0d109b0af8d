/// Session gate and page integration tests

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestContext;

const SUBREQUEST: &str = "middleware:middleware:middleware:middleware:middleware";

#[tokio::test]
async fn test_admin_requires_session() {
    let ctx = TestContext::new();

    let response = ctx.get("/admin", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));

    let nested = ctx.get("/admin/users", None).await;
    assert_eq!(nested.status, StatusCode::SEE_OTHER);
    assert_eq!(nested.location(), Some("/login"));
}

#[tokio::test]
async fn test_non_admin_sees_denial() {
    let ctx = TestContext::new();
    let bob = ctx.create_user("bob@example.com", "Bob").await;
    let cookie = ctx.sign_in_as(&bob).await;

    for path in ["/admin", "/admin/", "/admin/users"] {
        let response = ctx.get(path, Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{}", path);
        assert!(response.body.contains("Access denied"));
        assert!(!response.body.contains("Admin dashboard"));
        assert!(!response.body.contains("bob@example.com"));
    }
}

#[tokio::test]
async fn test_admin_sees_dashboard() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin("diana@example.com", "Diana").await;
    let cookie = ctx.sign_in_as(&admin).await;

    let response = ctx.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Admin dashboard"));
    assert!(response.body.contains("diana@example.com"));
    assert!(response.body.contains("Diana"));
    assert!(response.body.contains("sensitive administrative functions"));
}

#[tokio::test]
async fn test_subrequest_header_does_not_bypass_gate() {
    let ctx = TestContext::new();
    let bob = ctx.create_user("bob@example.com", "Bob").await;
    let cookie = ctx.sign_in_as(&bob).await;

    let anonymous = Request::builder()
        .uri("/admin")
        .header("x-middleware-subrequest", SUBREQUEST)
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(anonymous).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));

    let non_admin = Request::builder()
        .uri("/admin")
        .header("x-middleware-subrequest", SUBREQUEST)
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(non_admin).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.body.contains("Access denied"));
}

#[tokio::test]
async fn test_request_headers_not_reflected() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .uri("/admin")
        .header("x-middleware-subrequest", SUBREQUEST)
        .header("x-middleware-rewrite", "/internal")
        .header("x-forwarded-host", "evil.test")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(request).await;

    for name in [
        "x-middleware-subrequest",
        "x-middleware-rewrite",
        "x-forwarded-host",
    ] {
        assert!(response.headers.get(name).is_none(), "{} reflected", name);
    }
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_admin_prefix_is_segment_aware() {
    let ctx = TestContext::new();
    let bob = ctx.create_user("bob@example.com", "Bob").await;
    let cookie = ctx.sign_in_as(&bob).await;

    // Not an admin path, just an unknown page
    let response = ctx.get("/administrator", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = ctx.get("/administrator", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_home_page() {
    let ctx = TestContext::new();

    let guest = ctx.get("/", None).await;
    assert_eq!(guest.status, StatusCode::OK);
    assert!(guest.body.contains(r#"data-auth-form="sign-in""#));
    assert!(guest.body.contains(r#"data-auth-form="sign-up""#));
    assert!(!guest.body.contains("data-todo-list"));

    let alice = ctx.create_user("alice@example.com", "<b>Alice</b>").await;
    let cookie = ctx.sign_in_as(&alice).await;

    let home = ctx.get("/", Some(&cookie)).await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("data-todo-list"));
    assert!(home.body.contains("data-sign-out"));
    assert!(home.body.contains("Welcome, &lt;b&gt;Alice&lt;/b&gt;!"));
}

#[tokio::test]
async fn test_login_and_register_pages() {
    let ctx = TestContext::new();

    let login = ctx.get("/login", None).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body.contains(r#"data-auth-form="sign-in""#));

    let register = ctx.get("/register", None).await;
    assert_eq!(register.status, StatusCode::OK);
    assert!(register.body.contains(r#"data-auth-form="sign-up""#));

    let alice = ctx.create_user("alice@example.com", "Alice").await;
    let cookie = ctx.sign_in_as(&alice).await;

    let login = ctx.get("/login", Some(&cookie)).await;
    assert_eq!(login.status, StatusCode::SEE_OTHER);
    assert_eq!(login.location(), Some("/"));
}

#[tokio::test]
async fn test_static_script_and_security_headers() {
    let ctx = TestContext::new();

    let script = ctx.get("/static/app.js", None).await;
    assert_eq!(script.status, StatusCode::OK);
    assert!(script
        .headers
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/javascript"));
    assert!(script.body.contains("/api/todos"));

    let page = ctx.get("/", None).await;
    assert_eq!(page.headers.get("x-frame-options").unwrap(), "DENY");
    assert!(page.headers.get("content-security-policy").is_some());
    assert!(page.headers.get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();

    let response = ctx.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
