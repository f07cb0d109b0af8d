/// Storage seam
///
/// Handlers and the auth module talk to a [`Store`] rather than a pool, so
/// the same code runs against PostgreSQL in production ([`PgStore`]) and an
/// in-process map in tests and demos ([`MemoryStore`]).
///
/// Every todo operation takes the caller's user ID; implementations must
/// apply it as a filter in the same step as the read or write.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    account::Account,
    session::{CreateSession, Session},
    todo::{CreateTodo, Todo, UpdateTodo},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint was violated (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique");
                if constraint.contains("email") {
                    return StoreError::Conflict("Email already exists".to_string());
                }
                return StoreError::Conflict(format!("Constraint violation: {}", constraint));
            }
        }

        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations used by the API and the seed tool
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe
    async fn ping(&self) -> StoreResult<()>;

    /// Creates a user and its email/password account atomically
    ///
    /// Fails with [`StoreError::Conflict`] if the email is taken.
    async fn create_user_with_credential(
        &self,
        user: CreateUser,
        password_hash: String,
    ) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Sets the admin flag; `None` if the user does not exist
    async fn set_user_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<Option<User>>;

    /// The user's email/password account, if any
    async fn find_credential_account(&self, user_id: Uuid) -> StoreResult<Option<Account>>;

    async fn create_session(&self, data: CreateSession) -> StoreResult<Session>;

    /// Resolves an unexpired session and its user by token digest
    async fn find_active_session(&self, token_hash: &str) -> StoreResult<Option<(Session, User)>>;

    /// Removes a session; true if one existed
    async fn delete_session(&self, token_hash: &str) -> StoreResult<bool>;

    /// Removes a user's expired sessions, returning how many went
    async fn delete_expired_sessions(&self, user_id: Uuid) -> StoreResult<u64>;

    /// The owner's todos, newest first
    async fn list_todos(&self, user_id: Uuid) -> StoreResult<Vec<Todo>>;

    async fn create_todo(&self, data: CreateTodo) -> StoreResult<Todo>;

    /// Partial update scoped to the owner; `None` on missing or foreign ID
    async fn update_todo(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTodo,
    ) -> StoreResult<Option<Todo>>;

    /// Delete scoped to the owner; false on missing or foreign ID
    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool>;

    /// Removes every user and everything they own
    async fn reset(&self) -> StoreResult<()>;
}
