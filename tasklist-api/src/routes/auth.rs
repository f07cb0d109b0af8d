/// Authentication endpoints
///
/// Email/password accounts with cookie sessions:
///
/// - `POST /api/auth/sign-up/email` - Create an account and sign in
/// - `POST /api/auth/sign-in/email` - Sign in
/// - `POST /api/auth/sign-out` - End the current session
/// - `GET  /api/auth/get-session` - Current `{session, user}` or `null`
///
/// Successful sign-up and sign-in set the session cookie (see
/// [`crate::session::session_cookie`]); the token never appears in a body.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    session::{removal_cookie, session_cookie, Client, MaybeUser},
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tasklist_shared::{
    auth::{
        password,
        session::{close_session, open_session, AuthContext, ClientInfo},
    },
    models::user::{CreateUser, User},
};
use tracing::{debug, info};
use validator::{Validate, ValidationError};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Generic `{ "success": true }` body
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    password::validate_password_length(password).map_err(|message| {
        ValidationError::new("password_length").with_message(Cow::Owned(message))
    })
}

async fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
    client: ClientInfo,
) -> ApiResult<(CookieJar, Json<AuthContext>)> {
    let opened = open_session(
        state.store.as_ref(),
        user.id,
        state.config.session_ttl(),
        client,
    )
    .await?;

    let jar = jar.add(session_cookie(&state.config, opened.token));

    Ok((
        jar,
        Json(AuthContext {
            session: opened.session,
            user,
        }),
    ))
}

/// Create an account with email and password
///
/// # Errors
///
/// - `400 Bad Request`: Body is not valid JSON
/// - `409 Conflict`: Email already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn sign_up(
    State(state): State<AppState>,
    Client(client): Client,
    jar: CookieJar,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<AuthContext>)> {
    let Json(mut req) = body?;
    req.email = req.email.trim().to_string();
    req.name = req.name.trim().to_string();

    req.validate()?;

    let password_hash = password::hash_password_blocking(req.password).await?;

    let user = state
        .store
        .create_user_with_credential(CreateUser::new(req.email, req.name), password_hash)
        .await?;

    info!(user_id = %user.id, "User registered");

    start_session(&state, jar, user, client).await
}

/// Sign in with email and password
///
/// Unknown emails and wrong passwords produce the same 401.
pub async fn sign_in(
    State(state): State<AppState>,
    Client(client): Client,
    jar: CookieJar,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<AuthContext>)> {
    let Json(mut req) = body?;
    req.email = req.email.trim().to_string();

    req.validate()?;

    let user = state
        .store
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let hash = state
        .store
        .find_credential_account(user.id)
        .await?
        .and_then(|account| account.password)
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !password::verify_password_blocking(req.password, hash).await? {
        debug!(user_id = %user.id, "Password mismatch");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let pruned = state.store.delete_expired_sessions(user.id).await?;
    if pruned > 0 {
        debug!(user_id = %user.id, pruned, "Removed expired sessions");
    }

    info!(user_id = %user.id, "User signed in");

    start_session(&state, jar, user, client).await
}

/// End the current session, if any, and clear the cookie
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<SuccessResponse>)> {
    let cookie_name = state.config.session.cookie_name.clone();

    if let Some(cookie) = jar.get(&cookie_name) {
        if close_session(state.store.as_ref(), cookie.value()).await? {
            debug!("Session closed");
        }
    }

    let jar = jar.remove(removal_cookie(&state.config));

    Ok((jar, Json(SuccessResponse { success: true })))
}

/// Current session and user, or `null`
pub async fn get_session(MaybeUser(context): MaybeUser) -> Json<Option<AuthContext>> {
    Json(context)
}
