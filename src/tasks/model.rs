//! Task data model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generate a new ULID string.
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Task lifecycle status. Stored as TEXT, serialized in SCREAMING_SNAKE_CASE
/// on the wire (`"TODO"`, `"IN_PROGRESS"`, `"DONE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl std::str::FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            other => Err(anyhow::anyhow!("unknown task status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: i64,
    pub due_date: Option<DateTime<Utc>>,
    /// Owning user, set at creation and never changed.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Create-request body. `title` is the only required field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial-update body: any subset of the mutable task fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Merge this patch into an existing row.
    ///
    /// Falsy-but-present fields are skipped, not applied: an empty-string
    /// title or description and `priority: 0` leave the stored value
    /// unchanged. Deliberate wire-compatibility behavior, covered by tests.
    pub fn apply(&self, row: &mut TaskRow) {
        if let Some(title) = &self.title {
            if !title.is_empty() {
                row.title = title.clone();
            }
        }
        if let Some(description) = &self.description {
            if !description.is_empty() {
                row.description = Some(description.clone());
            }
        }
        if let Some(status) = self.status {
            row.status = status;
        }
        if let Some(priority) = self.priority {
            if priority != 0 {
                row.priority = priority;
            }
        }
        if let Some(due_date) = self.due_date {
            row.due_date = Some(due_date);
        }
    }
}

/// Equality filters for the list operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<i64>,
}
