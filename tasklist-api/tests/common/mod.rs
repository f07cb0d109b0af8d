#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// Tests run the real router against the in-memory store:
/// - `TestContext::new()` builds the app
/// - `create_user` / `sign_in_as` create users and sessions directly in
///   the store, skipping password hashing
/// - request helpers return `(status, headers, body)`

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tasklist_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasklist_shared::{
    auth::session::{open_session, ClientInfo},
    models::user::{CreateUser, User},
    store::{MemoryStore, Store},
};
use tower::Service as _;

pub const COOKIE_NAME: &str = "tasklist.session_token";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgresql://localhost/tasklist_test".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Test context containing the app and its backing store
pub struct TestContext {
    pub store: MemoryStore,
    pub app: Router,
    pub config: Config,
}

/// Response pieces the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Body is not JSON ({}): {}", e, self.body))
    }

    /// `name=value` of the session cookie set by this response
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(&format!("{}=", COOKIE_NAME)))
            .map(|value| value.split(';').next().unwrap_or_default().to_string())
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()), config.clone());

        Self {
            store,
            app: build_router(state),
            config,
        }
    }

    /// Inserts a user with an unusable password hash
    pub async fn create_user(&self, email: &str, name: &str) -> User {
        self.store
            .create_user_with_credential(CreateUser::new(email, name), "not-a-hash".to_string())
            .await
            .unwrap()
    }

    pub async fn create_admin(&self, email: &str, name: &str) -> User {
        let user = self.create_user(email, name).await;
        self.store.set_user_admin(user.id, true).await.unwrap().unwrap()
    }

    /// Opens a session for `user` and returns the `Cookie` header value
    pub async fn sign_in_as(&self, user: &User) -> String {
        let opened = open_session(
            &self.store,
            user.id,
            chrono::Duration::hours(1),
            ClientInfo::default(),
        )
        .await
        .unwrap();

        format!("{}={}", COOKIE_NAME, opened.token)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: serde_json::Value,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}
