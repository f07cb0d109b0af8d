/// In-process [`Store`]
///
/// Keeps everything in vectors behind a tokio `RwLock`. Semantics match
/// [`PgStore`](super::PgStore): emails are unique and normalized, expired
/// sessions never resolve, todo access is owner-filtered, deleting users
/// cascades. Used by the API and seed test suites.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    account::{Account, CreateAccount},
    session::{CreateSession, Session},
    todo::{CreateTodo, Todo, UpdateTodo},
    user::{normalize_email, CreateUser, User},
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    accounts: Vec<Account>,
    sessions: Vec<Session>,
    todos: Vec<Todo>,
}

/// Shared, cloneable in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of todos across all users
    pub async fn todo_count(&self) -> usize {
        self.tables.read().await.todos.len()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user_with_credential(
        &self,
        user: CreateUser,
        password_hash: String,
    ) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        let email = normalize_email(&user.email);
        if tables.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }

        let created_at = user.created_at.unwrap_or_else(Utc::now);
        let created = User {
            id: Uuid::new_v4(),
            email,
            name: user.name,
            is_admin: false,
            email_verified: user.email_verified,
            created_at,
            updated_at: created_at,
        };

        let input = CreateAccount::credential(created.id, &created.email, password_hash);
        let now = Utc::now();
        tables.accounts.push(Account {
            id: Uuid::new_v4(),
            account_id: input.account_id,
            provider_id: input.provider_id,
            user_id: input.user_id,
            password: input.password,
            created_at: now,
            updated_at: now,
        });
        tables.users.push(created.clone());

        Ok(created)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = normalize_email(email);
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn set_user_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;

        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.is_admin = is_admin;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn find_credential_account(&self, user_id: Uuid) -> StoreResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.user_id == user_id && a.is_credential())
            .cloned())
    }

    async fn create_session(&self, data: CreateSession) -> StoreResult<Session> {
        let mut tables = self.tables.write().await;

        if tables.sessions.iter().any(|s| s.token_hash == data.token_hash) {
            return Err(StoreError::Conflict(
                "Constraint violation: sessions_token_hash_key".to_string(),
            ));
        }

        let session = Session {
            id: Uuid::new_v4(),
            token_hash: data.token_hash,
            user_id: data.user_id,
            expires_at: data.expires_at,
            ip_address: data.ip_address,
            user_agent: data.user_agent,
            created_at: Utc::now(),
        };
        tables.sessions.push(session.clone());

        Ok(session)
    }

    async fn find_active_session(&self, token_hash: &str) -> StoreResult<Option<(Session, User)>> {
        let tables = self.tables.read().await;

        let Some(session) = tables
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash && !s.is_expired())
        else {
            return Ok(None);
        };

        Ok(tables
            .users
            .iter()
            .find(|u| u.id == session.user_id)
            .map(|user| (session.clone(), user.clone())))
    }

    async fn delete_session(&self, token_hash: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.token_hash != token_hash);
        Ok(tables.sessions.len() < before)
    }

    async fn delete_expired_sessions(&self, user_id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables
            .sessions
            .retain(|s| !(s.user_id == user_id && s.is_expired()));
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn list_todos(&self, user_id: Uuid) -> StoreResult<Vec<Todo>> {
        let tables = self.tables.read().await;

        // Reverse first so equal timestamps still list the later insert first
        let mut todos: Vec<Todo> = tables
            .todos
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(todos)
    }

    async fn create_todo(&self, data: CreateTodo) -> StoreResult<Todo> {
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == data.user_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }

        let created_at = data.created_at.unwrap_or_else(Utc::now);
        let todo = Todo {
            id: Uuid::new_v4(),
            title: data.title,
            completed: data.completed,
            user_id: data.user_id,
            created_at,
            updated_at: created_at,
        };
        tables.todos.push(todo.clone());

        Ok(todo)
    }

    async fn update_todo(
        &self,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTodo,
    ) -> StoreResult<Option<Todo>> {
        let mut tables = self.tables.write().await;

        let Some(todo) = tables
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
        else {
            return Ok(None);
        };

        if data.is_empty() {
            return Ok(Some(todo.clone()));
        }

        if let Some(title) = data.title {
            todo.title = title;
        }
        if let Some(completed) = data.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();

        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.todos.len();
        tables
            .todos
            .retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(tables.todos.len() < before)
    }

    async fn reset(&self) -> StoreResult<()> {
        *self.tables.write().await = Tables::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn user(store: &MemoryStore, email: &str) -> User {
        store
            .create_user_with_credential(CreateUser::new(email, "Test User"), "hash".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_case_insensitively() {
        let store = MemoryStore::new();
        user(&store, "alice@example.com").await;

        let result = store
            .create_user_with_credential(
                CreateUser::new("ALICE@example.com", "Other"),
                "hash".to_string(),
            )
            .await;

        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_credential_account_created_with_user() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice@example.com").await;

        let account = store.find_credential_account(alice.id).await.unwrap().unwrap();
        assert_eq!(account.account_id, "alice@example.com");
        assert_eq!(account.password.as_deref(), Some("hash"));
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped_and_newest_first() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice@example.com").await;
        let bob = user(&store, "bob@example.com").await;

        let now = Utc::now();
        for (title, age) in [("old", 3), ("new", 1), ("middle", 2)] {
            store
                .create_todo(CreateTodo {
                    created_at: Some(now - Duration::hours(age)),
                    ..CreateTodo::new(alice.id, title)
                })
                .await
                .unwrap();
        }
        store.create_todo(CreateTodo::new(bob.id, "bob's")).await.unwrap();

        let titles: Vec<String> = store
            .list_todos(alice.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["new", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_foreign_update_and_delete_are_noops() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice@example.com").await;
        let bob = user(&store, "bob@example.com").await;
        let todo = store.create_todo(CreateTodo::new(alice.id, "mine")).await.unwrap();

        let update = UpdateTodo {
            title: Some("hijacked".to_string()),
            completed: Some(true),
        };
        assert!(store.update_todo(todo.id, bob.id, update).await.unwrap().is_none());
        assert!(!store.delete_todo(todo.id, bob.id).await.unwrap());

        let todos = store.list_todos(alice.id).await.unwrap();
        assert_eq!(todos, vec![todo]);
    }

    #[tokio::test]
    async fn test_expired_sessions_do_not_resolve() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice@example.com").await;

        store
            .create_session(CreateSession {
                token_hash: "expired".to_string(),
                user_id: alice.id,
                expires_at: Utc::now() - Duration::minutes(1),
                ip_address: None,
                user_agent: None,
            })
            .await
            .unwrap();

        assert!(store.find_active_session("expired").await.unwrap().is_none());
        assert_eq!(store.delete_expired_sessions(alice.id).await.unwrap(), 1);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice@example.com").await;
        store.create_todo(CreateTodo::new(alice.id, "x")).await.unwrap();

        store.reset().await.unwrap();

        assert!(store.find_user_by_id(alice.id).await.unwrap().is_none());
        assert_eq!(store.todo_count().await, 0);
    }
}
