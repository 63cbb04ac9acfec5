//! In-memory stand-in for the remote todo collection.
//!
//! Items keep insertion order and carry an opaque `_id`, matching what the
//! hosted service returns.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-populated with `todos`, in order.
pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(todos));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    log::debug!("list: {} todos", todos.len());
    Json(todos.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = Todo {
        id: Uuid::new_v4().simple().to_string(),
        title: input.title,
        completed: input.completed,
    };
    log::info!("created {}", todo.id);
    db.write().await.push(todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
        log::info!("update of unknown todo {id}");
        return Err(StatusCode::NOT_FOUND);
    };
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    log::info!("updated {id}");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        log::info!("delete of unknown todo {id}");
        StatusCode::NOT_FOUND
    } else {
        log::info!("deleted {id}");
        StatusCode::NO_CONTENT
    }
}
