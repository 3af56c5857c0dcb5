pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use once_cell::sync::OnceCell;
use serde_json::json;
use shelf_kernel::{InitCtx, Migration, Module};

use super::openapi::{error_response, json_response, no_content};
use repository::SqlTodoStore;

/// Schema of the `todos` table
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_create_todos",
        up: r#"
            CREATE TABLE IF NOT EXISTS todos (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT    NOT NULL,
                description TEXT    NOT NULL,
                priority    INTEGER NOT NULL,
                complete    BOOLEAN NOT NULL DEFAULT 0
            );
            "#,
    }]
}

/// Todo list persisted in the relational database.
///
/// The store is bound to the pool during `init`; routes are empty before that.
pub struct TodosModule {
    store: OnceCell<Arc<SqlTodoStore>>,
}

impl TodosModule {
    pub const fn new() -> Self {
        Self {
            store: OnceCell::new(),
        }
    }
}

impl Default for TodosModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for TodosModule {
    fn name(&self) -> &'static str {
        "todos"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let store = Arc::new(SqlTodoStore::new(ctx.db.clone()));
        if self.store.set(store).is_err() {
            tracing::warn!(module = self.name(), "todos module already initialized");
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "todos module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        match self.store.get() {
            Some(store) => routes::router(Arc::clone(store)),
            None => {
                tracing::warn!(module = self.name(), "routes requested before init, none mounted");
                Router::new()
            }
        }
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let todo = json!({ "$ref": "#/components/schemas/Todo" });
        let todo_list = json!({ "type": "array", "items": todo.clone() });
        let request_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/TodoRequest" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "minimum": 1 }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List todos",
                        "tags": ["Todos"],
                        "responses": {
                            "200": json_response("All todos", todo_list),
                            "500": error_response("Internal server error")
                        }
                    }
                },
                "/todo": {
                    "post": {
                        "summary": "Create a todo",
                        "tags": ["Todos"],
                        "requestBody": request_body.clone(),
                        "responses": {
                            "201": json_response("The stored todo", todo.clone()),
                            "422": error_response("Validation error")
                        }
                    }
                },
                "/todo/{id}": {
                    "parameters": id_param,
                    "get": {
                        "summary": "Get a todo by id",
                        "tags": ["Todos"],
                        "responses": {
                            "200": json_response("The todo", todo),
                            "404": error_response("Todo not found"),
                            "422": error_response("Invalid id")
                        }
                    },
                    "put": {
                        "summary": "Overwrite a todo's fields",
                        "tags": ["Todos"],
                        "requestBody": request_body,
                        "responses": {
                            "204": no_content("Todo updated"),
                            "404": error_response("Todo not found"),
                            "422": error_response("Validation error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a todo",
                        "tags": ["Todos"],
                        "responses": {
                            "204": no_content("Todo deleted"),
                            "404": error_response("Todo not found"),
                            "422": error_response("Invalid id")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Todo": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "description": { "type": "string" },
                            "priority": { "type": "integer" },
                            "complete": { "type": "boolean" }
                        },
                        "required": ["id", "title", "description", "priority", "complete"]
                    },
                    "TodoRequest": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 3 },
                            "description": { "type": "string", "minLength": 3, "maxLength": 100 },
                            "priority": { "type": "integer", "minimum": 1, "maximum": 5 },
                            "complete": { "type": "boolean", "default": false }
                        },
                        "required": ["title", "description", "priority"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "todos module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "todos module stopped");
        Ok(())
    }
}

/// Create a new instance of the todos module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(TodosModule::new())
}
