/// Session cookie handling and identity extractors
///
/// - [`CurrentUser`]: JSON routes; rejects with 401 when there is no session
/// - [`MaybeUser`]: pages that render differently for guests
///
/// Both reuse the identity the session gate attached on gated pages and
/// otherwise resolve the cookie themselves.

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::net::SocketAddr;
use tasklist_shared::{
    auth::session::{resolve_session, AuthContext, ClientInfo},
    store::StoreResult,
};

use crate::{app::AppState, config::Config, error::ApiError};

/// Resolves the session cookie in `jar`, if any
pub async fn identify(state: &AppState, jar: &CookieJar) -> StoreResult<Option<AuthContext>> {
    match jar.get(&state.config.session.cookie_name) {
        Some(cookie) => resolve_session(state.store.as_ref(), cookie.value()).await,
        None => Ok(None),
    }
}

async fn identify_parts(parts: &Parts, state: &AppState) -> StoreResult<Option<AuthContext>> {
    if let Some(context) = parts.extensions.get::<AuthContext>() {
        return Ok(Some(context.clone()));
    }

    identify(state, &CookieJar::from_headers(&parts.headers)).await
}

/// Cookie carrying a freshly issued session token
pub fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((config.session.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.api.production)
        .max_age(time::Duration::hours(config.session.ttl_hours))
        .build()
}

/// Cookie used to remove the session cookie from the browser
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build(config.session.cookie_name.clone())
        .path("/")
        .build()
}

/// Authenticated caller of a JSON route
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthContext);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        identify_parts(parts, state)
            .await?
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Caller identity when there may not be one
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthContext>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(identify_parts(parts, state).await?))
    }
}

/// Peer address and user agent for session bookkeeping
#[derive(Debug, Clone, Default)]
pub struct Client(pub ClientInfo);

#[async_trait]
impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Forwarding headers are client-controlled, so only the socket peer is recorded
        let ip_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.chars().take(512).collect());

        Ok(Client(ClientInfo {
            ip_address,
            user_agent,
        }))
    }
}
