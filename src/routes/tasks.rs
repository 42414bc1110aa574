use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{TodoInput, TodoPatch},
    todos,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's todos.
///
/// Returns exactly the todos owned by the requester, in insertion order.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Todo` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let items = todos::list_for_owner(pool.get_ref(), current_user.0.id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// Creates a new todo owned by the authenticated user.
///
/// The owner is always the authenticated identity; nothing in the payload
/// can assign the todo to someone else.
///
/// ## Request Body:
/// - `description`: What needs doing (required, non-empty).
/// - `completed` (optional): Initial completion state, defaults to false.
///
/// ## Responses:
/// - `200 OK`: The created `Todo` as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If validation fails (e.g. empty description).
/// - `500 Internal Server Error`: For database errors.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    todo_data.validate()?;

    let created = todos::create(pool.get_ref(), current_user.0.id, todo_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// Retrieves a specific todo by its ID.
///
/// The lookup is scoped to the authenticated user. A todo that does not
/// exist and a todo owned by another user produce the same 404.
///
/// ## Responses:
/// - `200 OK`: The `Todo` as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no todo with this ID is owned by the requester.
/// - `500 Internal Server Error`: For database errors.
#[get("/{id}")]
pub async fn get_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let todo = todos::find_scoped(pool.get_ref(), current_user.0.id, todo_id.into_inner()).await?;

    match todo {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}

/// Updates a todo owned by the authenticated user.
///
/// Applies only the fields present in the payload and stamps `updated_at`.
/// NotFound semantics are identical to `get_todo`.
///
/// ## Request Body:
/// - `description` (optional): New description, non-empty if present.
/// - `completed` (optional): New completion state.
///
/// ## Responses:
/// - `200 OK`: The updated `Todo` as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no todo with this ID is owned by the requester.
/// - `422 Unprocessable Entity`: If validation fails.
/// - `500 Internal Server Error`: For database errors.
#[put("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
    todo_data: web::Json<TodoPatch>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo =
        todos::update_scoped(pool.get_ref(), current_user.0.id, todo_id.into_inner(), &todo_data).await?;

    match todo {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}

/// Deletes a todo owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: A confirmation message.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no todo with this ID is owned by the requester.
/// - `500 Internal Server Error`: For database errors.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let deleted = todos::delete_scoped(pool.get_ref(), current_user.0.id, todo_id.into_inner()).await?;

    if !deleted {
        return Err(AppError::NotFound("Todo not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Todo deleted successfully"
    })))
}

/// Toggles the completion flag of a todo owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: The updated `Todo` as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no todo with this ID is owned by the requester.
/// - `500 Internal Server Error`: For database errors.
#[patch("/{id}/complete")]
pub async fn toggle_todo_completion(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let todo =
        todos::toggle_completion(pool.get_ref(), current_user.0.id, todo_id.into_inner()).await?;

    match todo {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}
