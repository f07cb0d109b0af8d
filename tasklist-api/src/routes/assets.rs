/// Static assets compiled into the binary

use axum::{http::header, response::IntoResponse};

const APP_JS: &str = include_str!("../../assets/app.js");

/// `GET /static/app.js`
pub async fn app_js() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        APP_JS,
    )
}
