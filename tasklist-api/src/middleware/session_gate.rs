/// Session gate
///
/// Wraps the whole router. For each request it
///
/// 1. forwards public paths untouched, without consulting the store,
/// 2. otherwise resolves the session cookie through the store,
/// 3. asks [`authorization::evaluate`] whether the path may be served,
/// 4. redirects to `/login`, renders the denial view, or forwards the
///    request with the identity attached as an extension.
///
/// The policy lets the JSON API, static assets and `/health` through
/// without a session; API handlers answer 401 themselves through
/// [`crate::session::CurrentUser`], which resolves the cookie on demand.
///
/// Admin pages additionally receive an [`AdminGrant`]. The grant can only
/// be constructed here, and the admin handler refuses to render without it.
///
/// The gate reads nothing from the request but the path and the session
/// cookie. In particular `x-middleware-subrequest` grants nothing; it is
/// logged and the request is evaluated like any other.

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tasklist_shared::auth::{
    authorization::{self, Access, LOGIN_PATH},
    session::AuthContext,
};
use tracing::{debug, info, warn};

use crate::{app::AppState, error::ApiError, session, views};

/// Internal subrequest header some frameworks trusted to skip middleware
pub const SUBREQUEST_HEADER: &str = "x-middleware-subrequest";

/// Proof that the gate admitted an administrator to this request
#[derive(Debug, Clone)]
pub struct AdminGrant {
    context: AuthContext,
}

impl AdminGrant {
    pub fn context(&self) -> &AuthContext {
        &self.context
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminGrant
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AdminGrant>() {
            Some(grant) => Ok(grant.clone()),
            None => {
                warn!(path = %parts.uri.path(), "Admin page reached without a grant");
                Err(access_denied())
            }
        }
    }
}

/// The 403 denial page
pub fn access_denied() -> Response {
    (StatusCode::FORBIDDEN, Html(views::access_denied())).into_response()
}

/// Gate middleware; install with `middleware::from_fn_with_state`
pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if request.headers().contains_key(SUBREQUEST_HEADER) {
        warn!(path = %path, "Ignoring {} header from client", SUBREQUEST_HEADER);
    }

    if !authorization::requires_session(&path) {
        return next.run(request).await;
    }

    let identity = match session::identify(&state, &jar).await {
        Ok(identity) => identity,
        Err(err) => return ApiError::from(err).into_response(),
    };

    match authorization::evaluate(&path, identity.as_ref()) {
        Access::Unauthenticated => {
            debug!(path = %path, "No session, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        Access::Forbidden => {
            if let Some(context) = &identity {
                info!(user_id = %context.user_id(), path = %path, "Non-admin denied");
            }
            access_denied()
        }
        Access::Granted => {
            if let Some(context) = identity {
                if authorization::is_admin_path(&path) {
                    request.extensions_mut().insert(AdminGrant {
                        context: context.clone(),
                    });
                }
                request.extensions_mut().insert(context);
            }
            next.run(request).await
        }
    }
}
