//! `todos` table access.
//!
//! Each operation checks out one pooled connection and holds it for its whole duration.
//! The connection goes back to the pool when the guard drops, whichever way the operation ends.

use async_trait::async_trait;
use shelf_store::{RecordId, ResourceStore, StoreError};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};

use super::models::{Todo, TodoFields};

const SELECT_COLUMNS: &str = "SELECT id, title, description, priority, complete FROM todos";

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.into())
}

/// [`ResourceStore`] over the `todos` table; ids come from the table's autoincrement key
#[derive(Clone)]
pub struct SqlTodoStore {
    pool: SqlitePool,
}

impl SqlTodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn session(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        self.pool.acquire().await.map_err(backend)
    }

    /// Overwrite every non-key column of row `id`
    async fn overwrite(&self, id: RecordId, fields: TodoFields) -> Result<(), StoreError> {
        let mut conn = self.session().await?;
        let result = sqlx::query(
            "UPDATE todos SET title = ?, description = ?, priority = ?, complete = ? WHERE id = ?",
        )
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.priority)
        .bind(fields.complete)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }

        tracing::debug!(id, "todo row updated");
        Ok(())
    }
}

#[async_trait]
impl ResourceStore<Todo> for SqlTodoStore {
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let mut conn = self.session().await?;
        sqlx::query_as::<_, Todo>(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&mut *conn)
            .await
            .map_err(backend)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Todo, StoreError> {
        let mut conn = self.session().await?;
        sqlx::query_as::<_, Todo>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(backend)?
            .ok_or(StoreError::not_found(id))
    }

    async fn find_by<P>(&self, predicate: P) -> Result<Vec<Todo>, StoreError>
    where
        P: Fn(&Todo) -> bool + Send + Sync + 'static,
    {
        let todos = self.list_all().await?;
        Ok(todos.into_iter().filter(|todo| predicate(todo)).collect())
    }

    async fn create(&self, fields: TodoFields) -> Result<Todo, StoreError> {
        let mut conn = self.session().await?;
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, description, priority, complete) VALUES (?, ?, ?, ?) \
             RETURNING id, title, description, priority, complete",
        )
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.priority)
        .bind(fields.complete)
        .fetch_one(&mut *conn)
        .await
        .map_err(backend)?;

        tracing::debug!(id = todo.id, "todo row inserted");
        Ok(todo)
    }

    async fn replace(&self, id: RecordId, fields: TodoFields) -> Result<(), StoreError> {
        // The id column is the only one not in TodoFields, so replacing is overwriting.
        self.overwrite(id, fields).await
    }

    async fn update_fields(&self, id: RecordId, fields: TodoFields) -> Result<(), StoreError> {
        self.overwrite(id, fields).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        let mut conn = self.session().await?;
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }

        tracing::debug!(id, "todo row deleted");
        Ok(())
    }
}
