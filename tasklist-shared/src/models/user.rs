/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE,      -- always lower-case
///     name VARCHAR(255) NOT NULL,
///     is_admin BOOLEAN NOT NULL DEFAULT FALSE,
///     email_verified BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Users carry no secrets. Password hashes live on the `accounts` table so a
/// `User` can be serialized into API responses and session payloads as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Email address, unique and lower-case
    pub email: String,

    /// Display name
    pub name: String,

    /// Grants access to the `/admin` area
    pub is_admin: bool,

    /// Whether the address has been verified
    pub email_verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address; normalized with [`normalize_email`] before insert
    pub email: String,

    /// Display name
    pub name: String,

    /// Usually false; the seed tool creates pre-verified users
    pub email_verified: bool,

    /// Backdated creation time (seed data); `None` means now
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateUser {
    /// Plain sign-up input: unverified, created now
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            email_verified: false,
            created_at: None,
        }
    }
}

/// Lower-cases and trims an email address so lookups are case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

const USER_COLUMNS: &str = "id, email, name, is_admin, email_verified, created_at, updated_at";

impl User {
    /// Inserts a user
    ///
    /// Accepts any executor so sign-up can create the user and its
    /// credential account inside one transaction.
    ///
    /// # Errors
    ///
    /// Fails with a unique violation on `users_email_key` when the email is
    /// already registered.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateUser,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (email, name, email_verified, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, NOW()), COALESCE($4, NOW()))
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(normalize_email(&data.email))
            .bind(data.name)
            .bind(data.email_verified)
            .bind(data.created_at)
            .fetch_one(executor)
            .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a user by email (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(normalize_email(email))
            .fetch_optional(pool)
            .await
    }

    /// Grants or revokes the admin flag
    ///
    /// Returns the updated user, or `None` if no such user exists.
    pub async fn set_admin(
        pool: &PgPool,
        id: Uuid,
        is_admin: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET is_admin = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(is_admin)
            .fetch_optional(pool)
            .await
    }

    /// Deletes every user; accounts, sessions and todos cascade
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Counts registered users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
