//! In-memory stand-in for the todo backend.
//!
//! Serves the same routes and JSON shapes the client expects: `_id` keys,
//! a `createdAt` timestamp, the `{ "todos": [...] }` list envelope and the
//! `PUT /completed` endpoint. Todos are kept in insertion order.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

#[derive(Deserialize)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
}

impl TodoInput {
    fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

#[derive(Deserialize)]
pub struct CompleteInput {
    pub id: String,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todo", post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/completed", put(mark_completed))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todo backend listening");
    }
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<TodoList> {
    let todos = db.read().await;
    Json(TodoList {
        todos: todos.clone(),
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if !input.is_valid() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        description: input.description,
        completed: false,
        created_at: Utc::now(),
    };
    debug!(id = %todo.id, "created todo");
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    if !input.is_valid() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.description = input.description;
    debug!(%id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn mark_completed(
    State(db): State<Db>,
    Json(input): Json<CompleteInput>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == input.id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todo.completed = true;
    debug!(id = %input.id, "marked todo completed");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return StatusCode::NOT_FOUND;
    }
    debug!(%id, "deleted todo");
    StatusCode::NO_CONTENT
}
