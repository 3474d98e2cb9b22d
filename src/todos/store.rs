//! To-do Storage
//! Mission: CRUD over the todos table

use crate::db::Database;
use crate::todos::models::{Todo, TodoRequest};
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

const TODO_COLUMNS: &str = "id, title, description, priority, complete, owner_id";

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        complete: row.get(4)?,
        owner_id: row.get(5)?,
    })
}

/// To-do storage. Ownership rules live in the handlers, not here.
pub struct TodoStore {
    db: Database,
}

impl TodoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn create(&self, owner_id: i64, req: &TodoRequest) -> Result<Todo> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO todos (title, description, priority, complete, owner_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![req.title, req.description, req.priority, req.complete, owner_id],
        )
        .context("Failed to insert todo")?;

        let todo = Todo {
            id: conn.last_insert_rowid(),
            title: req.title.clone(),
            description: req.description.clone(),
            priority: req.priority,
            complete: req.complete,
            owner_id,
        };
        info!(todo_id = todo.id, owner_id, "Created todo");
        Ok(todo)
    }

    pub fn get(&self, todo_id: i64) -> Result<Option<Todo>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"))?;

        stmt.query_row(params![todo_id], row_to_todo)
            .optional()
            .context("Failed to load todo")
    }

    pub fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Todo>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE owner_id = ?1 ORDER BY id"
        ))?;

        let todos = stmt
            .query_map(params![owner_id], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(owner_id, count = todos.len(), "Listed todos");
        Ok(todos)
    }

    /// Every to-do in the system (admin only)
    pub fn list_all(&self) -> Result<Vec<Todo>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))?;

        let todos = stmt
            .query_map([], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    /// Overwrite every editable field. Returns false if the to-do is gone.
    pub fn update(&self, todo_id: i64, req: &TodoRequest) -> Result<bool> {
        let rows_affected = self
            .db
            .conn()
            .execute(
                "UPDATE todos SET title = ?1, description = ?2, priority = ?3, complete = ?4
                 WHERE id = ?5",
                params![req.title, req.description, req.priority, req.complete, todo_id],
            )
            .context("Failed to update todo")?;

        Ok(rows_affected > 0)
    }

    pub fn delete(&self, todo_id: i64) -> Result<bool> {
        let rows_affected = self
            .db
            .conn()
            .execute("DELETE FROM todos WHERE id = ?1", params![todo_id])
            .context("Failed to delete todo")?;

        if rows_affected > 0 {
            info!(todo_id, "Deleted todo");
        }
        Ok(rows_affected > 0)
    }
}
