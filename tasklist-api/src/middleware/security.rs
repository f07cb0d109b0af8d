/// Security headers middleware
///
/// Adds a fixed set of response headers to every response:
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Permissions-Policy` disabling sensors and payment APIs
/// - `Content-Security-Policy` allowing scripts only from this origin, which
///   is why page behaviour lives in `/static/app.js`
/// - `Strict-Transport-Security` (production only)
///
/// Headers are static values. Nothing from the request is echoed back.
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use tasklist_api::middleware::security::SecurityHeadersLayer;
///
/// let app: Router = Router::new()
///     .layer(SecurityHeadersLayer::new(true)); // true = production mode
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    response::Response,
};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self'; \
     style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; \
     form-action 'self'; frame-ancestors 'none'";

const PERMISSIONS_POLICY: &str = "geolocation=(), microphone=(), camera=(), payment=(), usb=()";

const HSTS: &str = "max-age=31536000; includeSubDomains";

type HeaderSet = Arc<Vec<(HeaderName, HeaderValue)>>;

/// Security headers middleware layer
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    headers: HeaderSet,
}

impl SecurityHeadersLayer {
    /// Creates a new security headers layer
    ///
    /// `production` enables HSTS; only set it when served over HTTPS.
    pub fn new(production: bool) -> Self {
        let mut headers = vec![
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ),
            (
                HeaderName::from_static("permissions-policy"),
                HeaderValue::from_static(PERMISSIONS_POLICY),
            ),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(CONTENT_SECURITY_POLICY),
            ),
        ];

        if production {
            headers.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS),
            ));
        }

        Self {
            headers: Arc::new(headers),
        }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersMiddleware {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// Security headers middleware service
#[derive(Clone)]
pub struct SecurityHeadersMiddleware<S> {
    inner: S,
    headers: HeaderSet,
}

impl<S> Service<Request> for SecurityHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);
        let headers = Arc::clone(&self.headers);

        Box::pin(async move {
            let mut response = future.await?;

            let target = response.headers_mut();
            for (name, value) in headers.iter() {
                target.insert(name.clone(), value.clone());
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::Service as _;

    async fn call(production: bool, request: Request) -> Response {
        let mut app = Router::new()
            .route("/test", get(|| async { "test" }))
            .layer(SecurityHeadersLayer::new(production));

        app.call(request).await.unwrap()
    }

    fn get_test() -> Request {
        Request::builder().uri("/test").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let response = call(false, get_test()).await;
        let headers = response.headers();

        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            headers.get("referrer-policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
        assert!(headers.get("permissions-policy").is_some());

        let csp = headers.get("content-security-policy").unwrap().to_str().unwrap();
        assert!(csp.contains("script-src 'self';"));
    }

    #[tokio::test]
    async fn test_hsts_only_in_production() {
        let response = call(true, get_test()).await;
        assert!(response.headers().get("strict-transport-security").is_some());

        let response = call(false, get_test()).await;
        assert!(response.headers().get("strict-transport-security").is_none());
    }

    #[tokio::test]
    async fn test_request_headers_not_reflected() {
        let request = Request::builder()
            .uri("/test")
            .header("x-middleware-subrequest", "middleware")
            .header("x-forwarded-host", "evil.test")
            .body(Body::empty())
            .unwrap();

        let response = call(false, request).await;

        assert!(response.headers().get("x-middleware-subrequest").is_none());
        assert!(response.headers().get("x-forwarded-host").is_none());
    }
}
