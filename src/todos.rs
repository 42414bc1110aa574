//!
//! # Ownership-Scoped Todo Operations
//!
//! Every query in this module filters by `user_id` in the same SQL statement
//! that selects or mutates the row — never fetch-then-check — so a row owned
//! by another user is simply invisible. "Does not exist" and "owned by
//! someone else" are the same `None`/`false` outcome by design; callers
//! translate that to a 404 without leaking existence.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Todo, TodoInput, TodoPatch};

/// Inserts a new todo owned by `owner_id`.
///
/// The owner always comes from the authenticated identity, never from the
/// request payload. Id and timestamps are generated here (`Todo::new`).
pub async fn create(pool: &PgPool, owner_id: Uuid, input: TodoInput) -> Result<Todo, AppError> {
    let todo = Todo::new(input, owner_id);

    let created = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (id, description, completed, user_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, description, completed, user_id, created_at, updated_at",
    )
    .bind(todo.id)
    .bind(&todo.description)
    .bind(todo.completed)
    .bind(todo.user_id)
    .bind(todo.created_at)
    .bind(todo.updated_at)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Returns every todo owned by `owner_id`, in insertion order.
pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Todo>, AppError> {
    let todos = sqlx::query_as::<_, Todo>(
        "SELECT id, description, completed, user_id, created_at, updated_at \
         FROM todos WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(todos)
}

/// Looks up a single todo by id, scoped to `owner_id`.
pub async fn find_scoped(
    pool: &PgPool,
    owner_id: Uuid,
    todo_id: Uuid,
) -> Result<Option<Todo>, AppError> {
    let todo = sqlx::query_as::<_, Todo>(
        "SELECT id, description, completed, user_id, created_at, updated_at \
         FROM todos WHERE id = $1 AND user_id = $2",
    )
    .bind(todo_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(todo)
}

/// Applies a partial update to a todo owned by `owner_id`.
///
/// Only fields present in the patch are written; `COALESCE` keeps the stored
/// value where the bind is NULL. `updated_at` is stamped on every hit.
pub async fn update_scoped(
    pool: &PgPool,
    owner_id: Uuid,
    todo_id: Uuid,
    patch: &TodoPatch,
) -> Result<Option<Todo>, AppError> {
    let todo = sqlx::query_as::<_, Todo>(
        "UPDATE todos \
         SET description = COALESCE($3, description), \
             completed = COALESCE($4, completed), \
             updated_at = $5 \
         WHERE id = $1 AND user_id = $2 \
         RETURNING id, description, completed, user_id, created_at, updated_at",
    )
    .bind(todo_id)
    .bind(owner_id)
    .bind(&patch.description)
    .bind(patch.completed)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(todo)
}

/// Deletes a todo owned by `owner_id`.
///
/// Returns `false` when nothing matched; not an error.
pub async fn delete_scoped(pool: &PgPool, owner_id: Uuid, todo_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(todo_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Flips the completion flag of a todo owned by `owner_id`.
pub async fn toggle_completion(
    pool: &PgPool,
    owner_id: Uuid,
    todo_id: Uuid,
) -> Result<Option<Todo>, AppError> {
    let todo = sqlx::query_as::<_, Todo>(
        "UPDATE todos \
         SET completed = NOT completed, updated_at = $3 \
         WHERE id = $1 AND user_id = $2 \
         RETURNING id, description, completed, user_id, created_at, updated_at",
    )
    .bind(todo_id)
    .bind(owner_id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(todo)
}
