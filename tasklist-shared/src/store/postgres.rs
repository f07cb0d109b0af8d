/// PostgreSQL-backed [`Store`]
///
/// A thin delegation layer over the model functions; the only logic of its
/// own is the sign-up transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{Store, StoreResult};
use crate::models::{
    account::{Account, CreateAccount},
    session::{CreateSession, Session},
    todo::{CreateTodo, Todo, UpdateTodo},
    user::{CreateUser, User},
};

/// Store over a pooled PostgreSQL connection
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user_with_credential(
        &self,
        user: CreateUser,
        password_hash: String,
    ) -> StoreResult<User> {
        let mut tx = self.pool.begin().await?;

        let created = User::create(&mut *tx, user).await?;
        Account::create(
            &mut *tx,
            CreateAccount::credential(created.id, &created.email, password_hash),
        )
        .await?;

        tx.commit().await?;
        debug!(user_id = %created.id, "Created user with credential account");

        Ok(created)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn set_user_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<Option<User>> {
        Ok(User::set_admin(&self.pool, id, is_admin).await?)
    }

    async fn find_credential_account(&self, user_id: Uuid) -> StoreResult<Option<Account>> {
        Ok(Account::find_credential(&self.pool, user_id).await?)
    }

    async fn create_session(&self, data: CreateSession) -> StoreResult<Session> {
        Ok(Session::create(&self.pool, data).await?)
    }

    async fn find_active_session(&self, token_hash: &str) -> StoreResult<Option<(Session, User)>> {
        let Some(session) = Session::find_active(&self.pool, token_hash).await? else {
            return Ok(None);
        };

        let user = User::find_by_id(&self.pool, session.user_id).await?;
        Ok(user.map(|user| (session, user)))
    }

    async fn delete_session(&self, token_hash: &str) -> StoreResult<bool> {
        Ok(Session::delete_by_token_hash(&self.pool, token_hash).await?)
    }

    async fn delete_expired_sessions(&self, user_id: Uuid) -> StoreResult<u64> {
        Ok(Session::delete_expired_for_user(&self.pool, user_id).await?)
    }

    async fn list_todos(&self, user_id: Uuid) -> StoreResult<Vec<Todo>> {
        Ok(Todo::list_for_user(&self.pool, user_id).await?)
    }

    async fn create_todo(&self, data: CreateTodo) -> StoreResult<Todo> {
        Ok(Todo::create(&self.pool, data).await?)
    }

    async fn update_todo(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTodo,
    ) -> StoreResult<Option<Todo>> {
        Ok(Todo::update_owned(&self.pool, id, user_id, data).await?)
    }

    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        Ok(Todo::delete_owned(&self.pool, id, user_id).await?)
    }

    async fn reset(&self) -> StoreResult<()> {
        let removed = User::delete_all(&self.pool).await?;
        debug!(users = removed, "Removed all users");
        Ok(())
    }
}
