//! HTTP handlers for the todo list

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use shelf_http::{AppError, IdPath, ValidJson};
use shelf_store::ResourceStore;

use super::models::{Todo, TodoFields};

/// Todo routes over any store of [`Todo`]s
pub fn router<S: ResourceStore<Todo>>(store: Arc<S>) -> Router {
    Router::new()
        .route("/", get(list_todos::<S>))
        .route("/todo", post(create_todo::<S>))
        .route(
            "/todo/{id}",
            get(get_todo::<S>)
                .put(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
        .with_state(store)
}

async fn list_todos<S: ResourceStore<Todo>>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(store.list_all().await?))
}

async fn get_todo<S: ResourceStore<Todo>>(
    State(store): State<Arc<S>>,
    IdPath(id): IdPath,
) -> Result<Json<Todo>, AppError> {
    Ok(Json(store.get_by_id(id).await?))
}

async fn create_todo<S: ResourceStore<Todo>>(
    State(store): State<Arc<S>>,
    ValidJson(fields): ValidJson<TodoFields>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = store.create(fields).await?;
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo<S: ResourceStore<Todo>>(
    State(store): State<Arc<S>>,
    IdPath(id): IdPath,
    ValidJson(fields): ValidJson<TodoFields>,
) -> Result<StatusCode, AppError> {
    store.update_fields(id, fields).await?;
    tracing::info!(id, "todo updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_todo<S: ResourceStore<Todo>>(
    State(store): State<Arc<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    store.delete(id).await?;
    tracing::info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
