/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasklist_api::{app::{build_router, AppState}, config::Config};
/// use tasklist_shared::{db::pool::{create_pool, DatabaseConfig}, store::PgStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig::from_url(&config.database.url)).await?;
/// let state = AppState::new(Arc::new(PgStore::new(pool)), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{security::SecurityHeadersLayer, session_gate::session_gate},
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tasklist_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistent storage (Postgres in production, in-memory in tests)
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health
/// ├── /api/
/// │   ├── /auth/
/// │   │   ├── POST /sign-up/email
/// │   │   ├── POST /sign-in/email
/// │   │   ├── POST /sign-out
/// │   │   └── GET  /get-session
/// │   └── /todos/
/// │       ├── GET    /
/// │       ├── POST   /
/// │       ├── PUT    /:id
/// │       └── DELETE /:id
/// ├── GET  /               # todo list or sign-in/sign-up
/// ├── GET  /login
/// ├── GET  /register
/// ├── GET  /admin          # admins only
/// └── GET  /static/app.js
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. Security headers
/// 2. CORS
/// 3. Request tracing
/// 4. Session gate
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new()
        .route("/auth/sign-up/email", post(routes::auth::sign_up))
        .route("/auth/sign-in/email", post(routes::auth::sign_in))
        .route("/auth/sign-out", post(routes::auth::sign_out))
        .route("/auth/get-session", get(routes::auth::get_session))
        .route(
            "/todos",
            get(routes::todos::list_todos).post(routes::todos::create_todo),
        )
        .route(
            "/todos/:id",
            put(routes::todos::update_todo).delete(routes::todos::delete_todo),
        );

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .route("/", get(routes::pages::home))
        .route("/login", get(routes::pages::login))
        .route("/register", get(routes::pages::register))
        .route("/admin", get(routes::pages::admin))
        .route("/static/app.js", get(routes::assets::app_js))
        .fallback(routes::pages::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
