/// Session model: one row per signed-in browser
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     token_hash CHAR(64) NOT NULL UNIQUE,     -- SHA-256 hex of the cookie token
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     expires_at TIMESTAMPTZ NOT NULL,
///     ip_address VARCHAR(64),
///     user_agent TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The plaintext token only ever exists in the cookie. Lookups hash the
/// presented token and match on `token_hash`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A persisted session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub token_hash: String,

    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for opening a session
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub token_hash: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

const SESSION_COLUMNS: &str =
    "id, token_hash, user_id, expires_at, ip_address, user_agent, created_at";

impl Session {
    /// True once `expires_at` has passed
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Inserts a session
    pub async fn create(pool: &PgPool, data: CreateSession) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO sessions (token_hash, user_id, expires_at, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SESSION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Session>(&query)
            .bind(data.token_hash)
            .bind(data.user_id)
            .bind(data.expires_at)
            .bind(data.ip_address)
            .bind(data.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Finds an unexpired session by token digest
    pub async fn find_active(pool: &PgPool, token_hash: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE token_hash = $1 AND expires_at > NOW()"
        );

        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Deletes a session by token digest; true if a row was removed
    pub async fn delete_by_token_hash(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user's expired sessions
    pub async fn delete_expired_for_user(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= NOW()")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            id: Uuid::new_v4(),
            token_hash: "0".repeat(64),
            user_id: Uuid::new_v4(),
            expires_at,
            ip_address: None,
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_expired() {
        assert!(session_expiring_at(Utc::now() - Duration::seconds(1)).is_expired());
        assert!(!session_expiring_at(Utc::now() + Duration::hours(1)).is_expired());
    }

    #[test]
    fn test_token_hash_not_serialized() {
        let session = session_expiring_at(Utc::now());
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("token_hash").is_none());
        assert!(json.get("expires_at").is_some());
    }
}
