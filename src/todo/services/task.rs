//! Service layer for task creation, update, retrieval and deletion.

use super::{
    error::{EntityKind, InvalidArgument, TodoServiceResult, rejected},
    validation::{new_task_from_draft, require_matching_id, require_title},
};
use crate::todo::{
    domain::{Task, TaskChanges, TaskDraft, TaskId, TaskListId},
    ports::{TaskRepository, TodoRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;

/// Task orchestration service.
///
/// Constructed explicitly from its repository and clock.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task owned by the given list.
    ///
    /// An unknown list yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, task_list_id: TaskListId) -> TodoServiceResult<Vec<Task>> {
        Ok(self.repository.find_by_task_list_id(task_list_id).await?)
    }

    /// Creates a task inside an existing task list.
    ///
    /// The new task is always open; priority defaults to medium.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::IdAlreadyAssigned`],
    /// [`InvalidArgument::EmptyTitle`] or [`InvalidArgument::UnknownTaskList`]
    /// when the request is rejected, and
    /// [`super::TodoServiceError::Repository`] when persistence fails.
    pub async fn create_task(
        &self,
        task_list_id: TaskListId,
        draft: TaskDraft,
    ) -> TodoServiceResult<Task> {
        let new_task =
            new_task_from_draft(draft).map_err(|reason| rejected("create_task", reason))?;
        let task = Task::create(task_list_id, new_task, &*self.clock);

        self.repository
            .store(&task)
            .await
            .map_err(|err| match err {
                TodoRepositoryError::TaskListNotFound(missing) => {
                    rejected("create_task", InvalidArgument::UnknownTaskList(missing))
                }
                other => other.into(),
            })?;

        tracing::info!(task_id = %task.id(), %task_list_id, "created task");
        Ok(task)
    }

    /// Retrieves a task by owning list and identifier.
    ///
    /// Returns `Ok(None)` when no task matches both.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Repository`] when the lookup fails.
    pub async fn get_task(
        &self,
        task_list_id: TaskListId,
        task_id: TaskId,
    ) -> TodoServiceResult<Option<Task>> {
        Ok(self
            .repository
            .find_by_task_list_id_and_id(task_list_id, task_id)
            .await?)
    }

    /// Replaces the mutable state of an existing task.
    ///
    /// The draft must carry the full desired state, including an identifier
    /// equal to `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] when the identifier is missing or does not
    /// match, when priority, status or title is missing, or when no task
    /// matches the addressed pair. Returns
    /// [`super::TodoServiceError::Repository`] when persistence fails.
    pub async fn update_task(
        &self,
        task_list_id: TaskListId,
        task_id: TaskId,
        draft: TaskDraft,
    ) -> TodoServiceResult<Task> {
        let changes =
            changes_from_draft(task_id, draft).map_err(|reason| rejected("update_task", reason))?;
        let not_found = || {
            rejected(
                "update_task",
                InvalidArgument::TaskNotFound {
                    task_list_id,
                    task_id,
                },
            )
        };

        let mut task = self
            .repository
            .find_by_task_list_id_and_id(task_list_id, task_id)
            .await?
            .ok_or_else(not_found)?;
        task.apply_changes(changes, &*self.clock);

        self.repository
            .update(&task)
            .await
            .map_err(|err| match err {
                TodoRepositoryError::TaskNotFound(_) => not_found(),
                other => other.into(),
            })?;

        tracing::info!(%task_id, %task_list_id, status = task.status().as_str(), "updated task");
        Ok(task)
    }

    /// Deletes the task matching both owning list and identifier.
    ///
    /// Deleting an unknown pair succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Repository`] when persistence fails.
    pub async fn delete_task(
        &self,
        task_list_id: TaskListId,
        task_id: TaskId,
    ) -> TodoServiceResult<()> {
        let removed = self
            .repository
            .delete_by_task_list_id_and_id(task_list_id, task_id)
            .await?;
        if removed {
            tracing::info!(%task_id, %task_list_id, "deleted task");
        } else {
            tracing::debug!(%task_id, %task_list_id, "no task to delete");
        }
        Ok(())
    }
}

/// Applies the update rules to a task draft.
fn changes_from_draft(task_id: TaskId, draft: TaskDraft) -> Result<TaskChanges, InvalidArgument> {
    let TaskDraft {
        id,
        title,
        description,
        due_date,
        priority,
        status,
    } = draft;

    require_matching_id(id, task_id, EntityKind::Task, TaskId::into_inner)?;
    let validated_priority = priority.ok_or(InvalidArgument::MissingPriority)?;
    let validated_status = status.ok_or(InvalidArgument::MissingStatus)?;
    let validated_title = require_title(title, EntityKind::Task)?;

    Ok(TaskChanges {
        title: validated_title,
        description,
        due_date,
        priority: validated_priority,
        status: validated_status,
    })
}
