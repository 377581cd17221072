//! HTTP handlers for the /api/v1/tasks surface.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", post(create_task).get(list_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}

/// List query parameters. Values that fail to parse fall back to their
/// defaults rather than rejecting the request, so everything arrives as a
/// raw string first.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<Task>>), ApiError> {
    let Json(payload) = payload?;

    let task = state.task_service.create_task(&payload).await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success("Task created successfully", task)),
    ))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let id = Uuid::parse_str(&id)?;

    let task = state.task_service.get_task(id).await?;

    Ok(ResponseJson(ApiResponse::success(
        "Task retrieved successfully",
        task,
    )))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Task>>>, ApiError> {
    let filter = TaskFilter {
        status: query.status.as_deref().and_then(|s| s.parse().ok()),
        priority: query.priority.as_deref().and_then(|s| s.parse().ok()),
    };
    let page = query.page.as_deref().and_then(|s| s.parse().ok());
    let page_size = query.page_size.as_deref().and_then(|s| s.parse().ok());

    let (tasks, total) = state
        .task_service
        .list_tasks(&filter, page, page_size)
        .await?;

    Ok(ResponseJson(ApiResponse::success_list(
        "Tasks retrieved successfully",
        tasks,
        total,
    )))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let id = Uuid::parse_str(&id)?;
    let Json(payload) = payload?;

    let task = state.task_service.update_task(id, &payload).await?;

    Ok(ResponseJson(ApiResponse::success(
        "Task updated successfully",
        task,
    )))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let id = Uuid::parse_str(&id)?;

    state.task_service.delete_task(id).await?;

    Ok(ResponseJson(ApiResponse::ok("Task deleted successfully")))
}
