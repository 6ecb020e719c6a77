//! Task CRUD routes.
//!
//! Each handler is a thin pass-through: authenticated caller from the
//! request extension, one or two `TaskStorage` calls, a `{message, ...}`
//! JSON body. Ownership is enforced inside the storage predicates, so a
//! foreign task and a missing task are both a plain 404 here.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

use crate::rest::auth::AuthUser;
use crate::rest::error::ApiError;
use crate::tasks::model::{NewTask, TaskFilter, TaskPatch};
use crate::AppContext;

/// Query-string filters for the list route. Empty values (`?status=&priority=`)
/// count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<crate::tasks::model::TaskStatus>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub priority: Option<i64>,
}

fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewTask>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let task = ctx
        .tasks
        .create(&user.user_id, body)
        .await
        .map_err(|e| ApiError::internal("Error creating task", e))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Task created successfully", "task": task })),
    ))
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<AuthUser>,
    Query(q): Query<ListTasksQuery>,
) -> Result<Json<Value>, ApiError> {
    let filter = TaskFilter {
        status: q.status,
        priority: q.priority,
    };
    let tasks = ctx
        .tasks
        .list(&user.user_id, filter)
        .await
        .map_err(|e| ApiError::internal("Error retrieving tasks", e))?;
    Ok(Json(
        json!({ "message": "Tasks retrieved successfully", "tasks": tasks }),
    ))
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let task = ctx
        .tasks
        .find(&user.user_id, &id)
        .await
        .map_err(|e| ApiError::internal("Error retrieving task", e))?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(
        json!({ "message": "Task retrieved successfully", "task": task }),
    ))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Value>, ApiError> {
    let task = ctx
        .tasks
        .update(&user.user_id, &id, patch)
        .await
        .map_err(|e| ApiError::internal("Error updating task", e))?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(
        json!({ "message": "Task updated successfully", "task": task }),
    ))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let deleted = ctx
        .tasks
        .delete(&user.user_id, &id)
        .await
        .map_err(|e| ApiError::internal("Error deleting task", e))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
