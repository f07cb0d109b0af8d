/// Session lifecycle: open, resolve, close
///
/// This is the whole of the "auth service" the rest of the workspace relies
/// on. Resolution is uncached; every request hashes its cookie token and
/// asks the store.

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::token::{generate_session_token, hash_session_token, is_well_formed};
use crate::models::{
    session::{CreateSession, Session},
    user::User,
};
use crate::store::{Store, StoreResult};

/// Default session lifetime
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;

/// Identity attached to a request once its session resolves
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub session: Session,
    pub user: User,
}

impl AuthContext {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

/// Client metadata recorded with a new session
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// A newly opened session and the plaintext token for the cookie
#[derive(Debug, Clone)]
pub struct OpenedSession {
    pub token: String,
    pub session: Session,
}

/// Opens a session for `user_id` lasting `ttl`
pub async fn open_session(
    store: &dyn Store,
    user_id: Uuid,
    ttl: Duration,
    client: ClientInfo,
) -> StoreResult<OpenedSession> {
    let (token, token_hash) = generate_session_token();

    let session = store
        .create_session(CreateSession {
            token_hash,
            user_id,
            expires_at: Utc::now() + ttl,
            ip_address: client.ip_address,
            user_agent: client.user_agent,
        })
        .await?;

    debug!(session_id = %session.id, user_id = %user_id, "Opened session");
    Ok(OpenedSession { token, session })
}

/// Resolves a cookie token to its session and user
///
/// Malformed, unknown and expired tokens all yield `Ok(None)`.
pub async fn resolve_session(store: &dyn Store, token: &str) -> StoreResult<Option<AuthContext>> {
    if !is_well_formed(token) {
        return Ok(None);
    }

    let resolved = store
        .find_active_session(&hash_session_token(token))
        .await?
        .map(|(session, user)| AuthContext { session, user });

    Ok(resolved)
}

/// Deletes the session behind `token`; true if one existed
pub async fn close_session(store: &dyn Store, token: &str) -> StoreResult<bool> {
    if !is_well_formed(token) {
        return Ok(false);
    }

    store.delete_session(&hash_session_token(token)).await
}
