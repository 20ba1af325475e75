//! Unvalidated candidate input for task and task list operations.
//!
//! Drafts mirror the transfer shape: every field is optional and nothing
//! refers to an owning list or to timestamps. Services decide which fields
//! are required for each operation.

use super::{TaskId, TaskListId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};

/// Candidate task state supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Identifier claimed by the caller.
    pub id: Option<TaskId>,
    /// Requested title.
    pub title: Option<String>,
    /// Requested description.
    pub description: Option<String>,
    /// Requested due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Requested priority.
    pub priority: Option<TaskPriority>,
    /// Requested status.
    pub status: Option<TaskStatus>,
}

impl TaskDraft {
    /// Creates a draft carrying only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the claimed identifier.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Candidate task list state supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListDraft {
    /// Identifier claimed by the caller.
    pub id: Option<TaskListId>,
    /// Requested title.
    pub title: Option<String>,
    /// Requested description.
    pub description: Option<String>,
    /// Nested task drafts, if the caller sent any.
    pub tasks: Option<Vec<TaskDraft>>,
}

impl TaskListDraft {
    /// Creates a draft carrying only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the claimed identifier.
    #[must_use]
    pub const fn with_id(mut self, id: TaskListId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the nested task drafts.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = TaskDraft>) -> Self {
        self.tasks = Some(tasks.into_iter().collect());
        self
    }
}
