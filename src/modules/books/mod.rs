pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::settings::BooksSettings;
use shelf_kernel::{InitCtx, Module};
use shelf_store::{MemoryStore, StoreError};

use super::openapi::{error_response, json_response, no_content};
use models::{seed_catalog, Book};

/// Books catalog held in process memory
pub struct BooksModule {
    store: Arc<MemoryStore<Book>>,
}

impl BooksModule {
    pub fn new(store: Arc<MemoryStore<Book>>) -> Self {
        Self { store }
    }

    pub fn from_settings(settings: &BooksSettings) -> Result<Self, StoreError> {
        let records = if settings.seed_catalog {
            seed_catalog()
        } else {
            Vec::new()
        };

        let store = MemoryStore::with_records(settings.id_policy, records)?;
        Ok(Self::new(Arc::new(store)))
    }

    pub fn store(&self) -> &Arc<MemoryStore<Book>> {
        &self.store
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            id_policy = ?self.store.policy(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book = json!({ "$ref": "#/components/schemas/Book" });
        let book_list = json_response(
            "Books in catalog order",
            json!({ "type": "array", "items": { "$ref": "#/components/schemas/Book" } }),
        );

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": { "200": book_list.clone() }
                    }
                },
                "/books/": {
                    "get": {
                        "summary": "Filter books by rating",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "rating",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "integer", "minimum": 1, "maximum": 5 }
                        }],
                        "responses": {
                            "200": book_list.clone(),
                            "422": error_response("Rating out of range")
                        }
                    }
                },
                "/books/{id}": {
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer", "minimum": 1 }
                    }],
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "responses": {
                            "200": json_response("The book", book.clone()),
                            "404": error_response("Book not found"),
                            "422": error_response("Invalid id")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "responses": {
                            "204": no_content("Book deleted"),
                            "404": error_response("Book not found"),
                            "422": error_response("Invalid id")
                        }
                    }
                },
                "/books/published_year/{published_year}": {
                    "get": {
                        "summary": "Filter books by publication year",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "published_year",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer" }
                        }],
                        "responses": { "200": book_list }
                    }
                },
                "/create-book": {
                    "post": {
                        "summary": "Add a book to the catalog",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookRequest" }
                                }
                            }
                        },
                        "responses": {
                            "201": json_response("The stored book", book),
                            "422": error_response("Validation error")
                        }
                    }
                },
                "/update_book": {
                    "put": {
                        "summary": "Replace the book whose id is given in the body",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookRequest" }
                                }
                            }
                        },
                        "responses": {
                            "204": no_content("Book replaced"),
                            "404": error_response("Book not found"),
                            "422": error_response("Validation error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "description": "Server-assigned identifier"
                            },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "description": { "type": "string" },
                            "rating": { "type": "integer" },
                            "published_year": { "type": "integer" }
                        },
                        "required": [
                            "id", "title", "author", "description", "rating", "published_year"
                        ]
                    },
                    "BookRequest": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "description": "Ignored on create, selects the book on update"
                            },
                            "title": { "type": "string", "minLength": 3 },
                            "author": { "type": "string", "minLength": 1 },
                            "description": { "type": "string", "minLength": 1, "maxLength": 100 },
                            "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                            "published_year": { "type": "integer", "minimum": 1, "maximum": 2999 }
                        },
                        "required": ["title", "author", "description", "rating", "published_year"],
                        "example": {
                            "title": "A new book",
                            "author": "Famous author",
                            "description": "Excellent book",
                            "rating": 3,
                            "published_year": 2024
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped"
        );
        Ok(())
    }
}

/// Create the books module configured by `settings`
pub fn create_module(settings: &BooksSettings) -> anyhow::Result<Arc<dyn Module>> {
    Ok(Arc::new(BooksModule::from_settings(settings)?))
}
