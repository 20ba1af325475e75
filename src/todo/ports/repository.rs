//! Repository ports for task list and task persistence.

use crate::todo::domain::{Task, TaskId, TaskList, TaskListId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Task list persistence contract.
#[async_trait]
pub trait TaskListRepository: Send + Sync {
    /// Stores a new task list together with every task it references.
    ///
    /// The list and its tasks are written atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTaskList`] when the identifier
    /// already exists.
    async fn store(&self, task_list: &TaskList) -> TodoRepositoryResult<()>;

    /// Persists title, description and `updated_at` of an existing list.
    ///
    /// Owned tasks are not written.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskListNotFound`] when the list does
    /// not exist.
    async fn update(&self, task_list: &TaskList) -> TodoRepositoryResult<()>;

    /// Returns every task list with its tasks loaded.
    async fn find_all(&self) -> TodoRepositoryResult<Vec<TaskList>>;

    /// Finds a task list by identifier, with its tasks loaded.
    ///
    /// Returns `None` when the list does not exist.
    async fn find_by_id(&self, id: TaskListId) -> TodoRepositoryResult<Option<TaskList>>;

    /// Deletes a task list and all of its tasks in one transaction.
    ///
    /// Deleting an unknown identifier is a no-op. Returns whether a list was
    /// removed.
    async fn delete_by_id(&self, id: TaskListId) -> TodoRepositoryResult<bool>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task under its owning task list.
    ///
    /// The parent-existence check and the insert happen atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskListNotFound`] when the owning list
    /// does not exist or [`TodoRepositoryError::DuplicateTask`] when the task
    /// identifier is already taken.
    async fn store(&self, task: &Task) -> TodoRepositoryResult<()>;

    /// Persists the mutable fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskNotFound`] when no task matches both
    /// the owning list and the identifier.
    async fn update(&self, task: &Task) -> TodoRepositoryResult<()>;

    /// Returns all tasks owned by the given list.
    async fn find_by_task_list_id(
        &self,
        task_list_id: TaskListId,
    ) -> TodoRepositoryResult<Vec<Task>>;

    /// Finds a task by owning list and identifier.
    ///
    /// Returns `None` when no task matches both.
    async fn find_by_task_list_id_and_id(
        &self,
        task_list_id: TaskListId,
        id: TaskId,
    ) -> TodoRepositoryResult<Option<Task>>;

    /// Deletes at most one task matching both owning list and identifier.
    ///
    /// Deleting an unknown pair is a no-op. Returns whether a task was
    /// removed.
    async fn delete_by_task_list_id_and_id(
        &self,
        task_list_id: TaskListId,
        id: TaskId,
    ) -> TodoRepositoryResult<bool>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A task list with the same identifier already exists.
    #[error("duplicate task list identifier: {0}")]
    DuplicateTaskList(TaskListId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task list was not found.
    #[error("task list not found: {0}")]
    TaskListNotFound(TaskListId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
