/// Todo model and its owner-scoped queries
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Every read and write takes the caller's `user_id` and filters on it in
/// the same statement. There is deliberately no unscoped lookup by ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 500;

/// A user-owned task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,

    /// Owner; the only user who can see or change this row
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub user_id: Uuid,
    pub title: String,
    pub completed: bool,

    /// Backdated creation time (seed data); `None` means now
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateTodo {
    /// New, not yet completed todo for `user_id`
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            completed: false,
            created_at: None,
        }
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// Checks and normalizes a title: trimmed, non-empty, at most
/// [`MAX_TITLE_LENGTH`] characters
pub fn normalize_title(title: &str) -> Result<String, String> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err("Title is required".to_string());
    }

    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        ));
    }

    Ok(trimmed.to_string())
}

const TODO_COLUMNS: &str = "id, title, completed, user_id, created_at, updated_at";

impl Todo {
    /// Lists the owner's todos, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1 ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Inserts a todo
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO todos (title, completed, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, NOW()), COALESCE($4, NOW()))
            RETURNING {TODO_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(data.title)
            .bind(data.completed)
            .bind(data.user_id)
            .bind(data.created_at)
            .fetch_one(pool)
            .await
    }

    /// Fetches one todo if `user_id` owns it
    pub async fn find_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2");

        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Applies a partial update if `user_id` owns the todo
    ///
    /// Returns `None` when the todo does not exist or belongs to someone
    /// else; in both cases no row is touched.
    pub async fn update_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTodo,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_owned(pool, id, user_id).await;
        }

        let query = format!(
            r#"
            UPDATE todos
            SET title = COALESCE($3, title),
                completed = COALESCE($4, completed),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(user_id)
            .bind(data.title)
            .bind(data.completed)
            .fetch_optional(pool)
            .await
    }

    /// Deletes a todo if `user_id` owns it; true if a row was removed
    pub async fn delete_owned(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
