//! Owner-scoped task SQLite operations.
//!
//! Every predicate carries `user_id = ?`, so "not found" and "not yours"
//! are the same outcome by construction.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use super::model::*;

pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, new: NewTask) -> Result<TaskRow> {
        let id = new_id();
        let status = new.status.unwrap_or(TaskStatus::Todo);
        // `priority: 0` is coerced to the default, same falsy rule as
        // TaskPatch::apply.
        let priority = new.priority.filter(|p| *p != 0).unwrap_or(1);
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO tasks (id, title, description, status, priority, due_date, user_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(status)
        .bind(priority)
        .bind(new.due_date)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.find(user_id, &id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("task not found after insert"))
    }

    /// List the caller's tasks, newest first. `rowid` breaks creation-time
    /// ties deterministically.
    pub async fn list(&self, user_id: &str, filter: TaskFilter) -> Result<Vec<TaskRow>> {
        match (filter.status, filter.priority) {
            (Some(s), Some(p)) => Ok(sqlx::query_as(
                "SELECT * FROM tasks WHERE user_id = ? AND status = ? AND priority = ? \
                 ORDER BY created_at DESC, rowid DESC",
            )
            .bind(user_id)
            .bind(s)
            .bind(p)
            .fetch_all(&self.pool)
            .await?),
            (Some(s), None) => Ok(sqlx::query_as(
                "SELECT * FROM tasks WHERE user_id = ? AND status = ? \
                 ORDER BY created_at DESC, rowid DESC",
            )
            .bind(user_id)
            .bind(s)
            .fetch_all(&self.pool)
            .await?),
            (None, Some(p)) => Ok(sqlx::query_as(
                "SELECT * FROM tasks WHERE user_id = ? AND priority = ? \
                 ORDER BY created_at DESC, rowid DESC",
            )
            .bind(user_id)
            .bind(p)
            .fetch_all(&self.pool)
            .await?),
            (None, None) => Ok(sqlx::query_as(
                "SELECT * FROM tasks WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?),
        }
    }

    pub async fn find(&self, user_id: &str, id: &str) -> Result<Option<TaskRow>> {
        Ok(
            sqlx::query_as("SELECT * FROM tasks WHERE id = ? AND user_id = ?")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Merge `patch` into the stored row. Returns `None` when the task does
    /// not exist for this owner. Read-then-write, not atomic (see TaskPatch
    /// for which fields a patch actually touches).
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        patch: TaskPatch,
    ) -> Result<Option<TaskRow>> {
        let Some(mut row) = self.find(user_id, id).await? else {
            return Ok(None);
        };
        patch.apply(&mut row);
        sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, status = ?, priority = ?, due_date = ? \
             WHERE id = ? AND user_id = ?",
        )
        .bind(&row.title)
        .bind(&row.description)
        .bind(row.status)
        .bind(row.priority)
        .bind(row.due_date)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        self.find(user_id, id).await
    }

    /// Permanently remove the task. Returns `false` when nothing matched
    /// (unknown id or wrong owner — indistinguishable by design).
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
