//! Service-level error types for todo operations.

use crate::todo::{
    domain::{TaskId, TaskListId},
    ports::TodoRepositoryError,
};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Which kind of entity a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A task.
    Task,
    /// A task list.
    TaskList,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => f.write_str("task"),
            Self::TaskList => f.write_str("task list"),
        }
    }
}

/// Rejection conditions for create and update requests.
///
/// Every validation failure and every "referenced entity not found" case is
/// reported through this type. Absence on plain lookups is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidArgument {
    /// The caller pre-assigned an identifier on creation.
    #[error("{0} already has an ID")]
    IdAlreadyAssigned(EntityKind),

    /// The title is absent or blank.
    #[error("{0} title is empty")]
    EmptyTitle(EntityKind),

    /// The update payload carries no identifier.
    #[error("{0} ID is empty")]
    MissingId(EntityKind),

    /// The payload identifier differs from the addressed one.
    #[error("{kind} ID {supplied} does not match {expected}")]
    IdMismatch {
        /// Entity kind.
        kind: EntityKind,
        /// Identifier addressed by the caller.
        expected: Uuid,
        /// Identifier carried in the payload.
        supplied: Uuid,
    },

    /// The update payload carries no priority.
    #[error("task priority is empty")]
    MissingPriority,

    /// The update payload carries no status.
    #[error("task status is empty")]
    MissingStatus,

    /// The target task list of a new task does not exist.
    #[error("invalid task list ID: {0}")]
    UnknownTaskList(TaskListId),

    /// No task matches the addressed pair.
    #[error("task {task_id} not found in task list {task_list_id}")]
    TaskNotFound {
        /// Addressed task list.
        task_list_id: TaskListId,
        /// Addressed task.
        task_id: TaskId,
    },

    /// No task list matches the addressed identifier.
    #[error("task list not found: {0}")]
    TaskListNotFound(TaskListId),
}

/// Service-level errors for todo operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// The request was rejected.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Logs a rejected request and wraps the reason as a service error.
pub(super) fn rejected(operation: &'static str, reason: InvalidArgument) -> TodoServiceError {
    tracing::debug!(operation, reason = %reason, "request rejected");
    TodoServiceError::InvalidArgument(reason)
}
