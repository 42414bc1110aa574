use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a todo.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// What needs doing. Must be non-empty; no upper bound.
    #[validate(length(min = 1))]
    pub description: String,

    /// Initial completion state, defaults to false when omitted.
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for an existing todo. Only the fields present in the
/// payload are applied; absent fields leave the stored value untouched.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct TodoPatch {
    #[validate(length(min = 1))]
    pub description: Option<String>,

    pub completed: Option<bool>,
}

/// Represents a todo entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique identifier for the todo (UUID v4).
    pub id: Uuid,
    /// What needs doing.
    pub description: String,
    /// Whether the item has been completed.
    pub completed: bool,
    /// Identifier of the owning user. Set once at creation, never changed.
    pub user_id: Uuid,
    /// Timestamp of when the todo was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the todo.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new `Todo` owned by `owner_id` from `TodoInput`.
    /// Sets `created_at` and `updated_at` to the current time and `id` to a
    /// fresh UUID.
    pub fn new(input: TodoInput, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            description: input.description,
            completed: input.completed,
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}
