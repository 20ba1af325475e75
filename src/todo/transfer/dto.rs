//! Transfer object shapes.

use crate::todo::domain::{TaskId, TaskListId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDto {
    /// Task identifier.
    pub id: Option<TaskId>,
    /// Task title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: Option<TaskPriority>,
    /// Completion status.
    pub status: Option<TaskStatus>,
}

/// Wire representation of a task list, with derived aggregates.
///
/// `count` and `progress` are computed from the nested tasks and ignored on
/// input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskListDto {
    /// Task list identifier.
    pub id: Option<TaskListId>,
    /// Task list title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Number of nested tasks.
    pub count: usize,
    /// Closed-task ratio; absent when there are no tasks.
    pub progress: Option<f64>,
    /// Nested tasks.
    pub tasks: Option<Vec<TaskDto>>,
}

/// Wire shape for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Human-readable reason.
    pub message: String,
    /// Error category.
    pub details: String,
}
