use crate::errors::AppError;
use crate::models::{
    AddTodoRequest, LogTaskRequest, Priority, ProgressResponse, ResetRequest, ResetResponse,
    TaskEntry, TaskKind, TaskLoggedResponse, TodoItem, ToggleTodoRequest,
};
use crate::state::AppState;
use crate::stats::{build_progress, date_key};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ledger = state.ledger.lock().await;
    let progress = build_progress(ledger.data(), state.streak_anchor);
    Html(render_index(&progress))
}

pub async fn get_progress(
    State(state): State<AppState>,
) -> Result<Json<ProgressResponse>, AppError> {
    let ledger = state.ledger.lock().await;
    Ok(Json(build_progress(ledger.data(), state.streak_anchor)))
}

pub async fn get_tasks(
    State(state): State<AppState>,
) -> Result<Json<IndexMap<String, Vec<TaskEntry>>>, AppError> {
    let ledger = state.ledger.lock().await;
    Ok(Json(ledger.data().tasks.clone()))
}

pub async fn log_task(
    State(state): State<AppState>,
    Json(payload): Json<LogTaskRequest>,
) -> Result<Json<TaskLoggedResponse>, AppError> {
    let response = apply_log_task(&state, payload).await?;
    Ok(Json(response))
}

pub async fn log_task_form(
    State(state): State<AppState>,
    Form(payload): Form<LogTaskRequest>,
) -> Result<Redirect, AppError> {
    apply_log_task(&state, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, AppError> {
    let ledger = state.ledger.lock().await;
    Ok(Json(ledger.data().todo_list.clone()))
}

pub async fn add_todo(
    State(state): State<AppState>,
    Json(payload): Json<AddTodoRequest>,
) -> Result<(StatusCode, Json<TodoItem>), AppError> {
    let task = payload.task.trim();
    if task.is_empty() {
        return Err(AppError::bad_request("task must not be empty"));
    }
    let priority = parse_priority(&payload.priority)?;
    let deadline = parse_deadline(&payload.deadline)?;

    let mut ledger = state.ledger.lock().await;
    let todo = ledger.add_todo(task, priority, deadline).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleTodoRequest>,
) -> Result<Json<TodoItem>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let todo = ledger.toggle_todo(id, payload.completed).await?;
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut ledger = state.ledger.lock().await;
    ledger.delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, AppError> {
    if !payload.confirm {
        return Err(AppError::bad_request("reset requires \"confirm\": true"));
    }

    let mut ledger = state.ledger.lock().await;
    Ok(Json(ledger.reset_all().await?))
}

async fn apply_log_task(
    state: &AppState,
    payload: LogTaskRequest,
) -> Result<TaskLoggedResponse, AppError> {
    let kind = parse_kind(&payload.kind)?;
    let priority = parse_priority(&payload.priority)?;

    let mut ledger = state.ledger.lock().await;
    ledger.log_task(kind, payload.description, priority).await
}

fn parse_kind(value: &str) -> Result<TaskKind, AppError> {
    TaskKind::parse(value).ok_or_else(|| {
        AppError::bad_request(format!(
            "type must be one of {}",
            TaskKind::NAMES.join(", ")
        ))
    })
}

fn parse_priority(value: &str) -> Result<Priority, AppError> {
    Priority::parse(value).ok_or_else(|| {
        AppError::bad_request(format!(
            "priority must be one of {}",
            Priority::NAMES.join(", ")
        ))
    })
}

fn parse_deadline(value: &str) -> Result<String, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(date_key)
        .map_err(|_| AppError::bad_request("deadline must be a YYYY-MM-DD date"))
}
