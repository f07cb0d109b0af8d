/// Account model: credential records attached to a user
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     account_id VARCHAR(255) NOT NULL,
///     provider_id VARCHAR(64) NOT NULL,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     password VARCHAR(255),                   -- Argon2id PHC string
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (provider_id, account_id)
/// );
/// ```
///
/// Email/password sign-up creates one account with provider
/// [`CREDENTIAL_PROVIDER`] whose `account_id` is the user's email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Provider ID for email/password accounts
pub const CREDENTIAL_PROVIDER: &str = "credential";

/// A credential record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,

    /// Identifier within the provider (the email for credential accounts)
    pub account_id: String,

    /// Which provider issued this account
    pub provider_id: String,

    /// Owning user
    pub user_id: Uuid,

    /// Argon2id hash; never serialized
    #[serde(skip_serializing)]
    pub password: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub account_id: String,
    pub provider_id: String,
    pub user_id: Uuid,
    pub password: Option<String>,
}

impl CreateAccount {
    /// Email/password account for `user_id`
    pub fn credential(user_id: Uuid, email: &str, password_hash: String) -> Self {
        Self {
            account_id: super::user::normalize_email(email),
            provider_id: CREDENTIAL_PROVIDER.to_string(),
            user_id,
            password: Some(password_hash),
        }
    }
}

const ACCOUNT_COLUMNS: &str =
    "id, account_id, provider_id, user_id, password, created_at, updated_at";

impl Account {
    /// Inserts an account
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateAccount,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO accounts (account_id, provider_id, user_id, password)
            VALUES ($1, $2, $3, $4)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(data.account_id)
            .bind(data.provider_id)
            .bind(data.user_id)
            .bind(data.password)
            .fetch_one(executor)
            .await
    }

    /// Finds the email/password account belonging to `user_id`
    pub async fn find_credential(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE user_id = $1 AND provider_id = $2"
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(user_id)
            .bind(CREDENTIAL_PROVIDER)
            .fetch_optional(pool)
            .await
    }

    /// True when the account can be used for password sign-in
    pub fn is_credential(&self) -> bool {
        self.provider_id == CREDENTIAL_PROVIDER && self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_account_input() {
        let user_id = Uuid::new_v4();
        let data = CreateAccount::credential(user_id, "Erin@Example.com", "$argon2id$x".to_string());

        assert_eq!(data.account_id, "erin@example.com");
        assert_eq!(data.provider_id, CREDENTIAL_PROVIDER);
        assert_eq!(data.user_id, user_id);
        assert_eq!(data.password.as_deref(), Some("$argon2id$x"));
    }

    #[test]
    fn test_password_not_serialized() {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            account_id: "erin@example.com".to_string(),
            provider_id: CREDENTIAL_PROVIDER.to_string(),
            user_id: Uuid::new_v4(),
            password: Some("$argon2id$secret".to_string()),
            created_at: now,
            updated_at: now,
        };

        assert!(account.is_credential());
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret"));
    }
}
