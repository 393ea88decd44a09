use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks/log", post(handlers::log_task_form))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/tasks", get(handlers::get_tasks).post(handlers::log_task))
        .route("/api/todos", get(handlers::get_todos).post(handlers::add_todo))
        .route("/api/todos/:id/toggle", post(handlers::toggle_todo))
        .route("/api/todos/:id", delete(handlers::delete_todo))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
