/// Todo endpoints
///
/// Every handler takes a [`CurrentUser`], so an unauthenticated request is
/// rejected with 401 before the body is even parsed. Store calls always
/// carry the caller's user id; a todo owned by someone else looks exactly
/// like one that does not exist.
///
/// # Endpoints
///
/// - `GET    /api/todos` - List the caller's todos, newest first
/// - `POST   /api/todos` - Create a todo
/// - `PUT    /api/todos/:id` - Update title and/or completion
/// - `DELETE /api/todos/:id` - Delete a todo

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::SuccessResponse,
    session::CurrentUser,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tasklist_shared::models::todo::{normalize_title, CreateTodo, Todo, UpdateTodo};
use tracing::debug;
use uuid::Uuid;

const TODO_NOT_FOUND: &str = "Todo not found";

/// Create request; `title` is optional here so a missing one gets the same
/// 400 as a blank one
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
}

/// Update request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

fn todo_id(path: Result<Path<Uuid>, PathRejection>) -> ApiResult<Uuid> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound(TODO_NOT_FOUND.to_string()))
}

/// List the caller's todos
pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.store.list_todos(context.user_id()).await?;
    Ok(Json(todos))
}

/// Create a todo with `completed = false`
///
/// # Errors
///
/// - `400 Bad Request`: Title missing, blank, or longer than 500 characters
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let Json(req) = body?;

    let title = normalize_title(req.title.as_deref().unwrap_or_default())
        .map_err(ApiError::BadRequest)?;

    let todo = state
        .store
        .create_todo(CreateTodo::new(context.user_id(), title))
        .await?;

    debug!(user_id = %context.user_id(), todo_id = %todo.id, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Update a todo owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: Provided title is blank or too long
/// - `404 Not Found`: No such todo for this user
pub async fn update_todo(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let id = todo_id(path)?;
    let Json(req) = body?;

    let title = req
        .title
        .as_deref()
        .map(normalize_title)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let changes = UpdateTodo {
        title,
        completed: req.completed,
    };

    let todo = state
        .store
        .update_todo(id, context.user_id(), changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(TODO_NOT_FOUND.to_string()))?;

    Ok(Json(todo))
}

/// Delete a todo owned by the caller
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(context): CurrentUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = todo_id(path)?;

    if !state.store.delete_todo(id, context.user_id()).await? {
        return Err(ApiError::NotFound(TODO_NOT_FOUND.to_string()));
    }

    debug!(user_id = %context.user_id(), todo_id = %id, "Todo deleted");
    Ok(Json(SuccessResponse { success: true }))
}
