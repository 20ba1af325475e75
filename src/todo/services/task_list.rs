//! Service layer for task list creation, update, retrieval and deletion.

use super::{
    error::{EntityKind, InvalidArgument, TodoServiceResult, rejected},
    validation::{new_task_from_draft, reject_assigned_id, require_matching_id, require_title},
};
use crate::todo::{
    domain::{NewTask, NewTaskList, TaskList, TaskListChanges, TaskListDraft, TaskListId},
    ports::{TaskListRepository, TodoRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;

/// Task list orchestration service.
pub struct TaskListService<R, C>
where
    R: TaskListRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskListService<R, C>
where
    R: TaskListRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskListService<R, C>
where
    R: TaskListRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task list service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task list with its tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Repository`] when the lookup fails.
    pub async fn list_task_lists(&self) -> TodoServiceResult<Vec<TaskList>> {
        Ok(self.repository.find_all().await?)
    }

    /// Creates a task list, together with any nested task drafts.
    ///
    /// Nested drafts follow the task creation rules. The list and its tasks
    /// are stored atomically.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::IdAlreadyAssigned`] or
    /// [`InvalidArgument::EmptyTitle`] for the list or any nested task, and
    /// [`super::TodoServiceError::Repository`] when persistence fails.
    pub async fn create_task_list(&self, draft: TaskListDraft) -> TodoServiceResult<TaskList> {
        let (new_list, nested) =
            validate_creation(draft).map_err(|reason| rejected("create_task_list", reason))?;

        let mut task_list = TaskList::create(new_list, &*self.clock);
        for new_task in nested {
            task_list.add_task(new_task, &*self.clock);
        }

        self.repository.store(&task_list).await?;
        tracing::info!(
            task_list_id = %task_list.id(),
            tasks = task_list.count(),
            "created task list"
        );
        Ok(task_list)
    }

    /// Retrieves a task list with its tasks loaded.
    ///
    /// Returns `Ok(None)` when the list does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Repository`] when the lookup fails.
    pub async fn get_task_list(&self, id: TaskListId) -> TodoServiceResult<Option<TaskList>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Replaces the title and description of an existing task list.
    ///
    /// Nested task drafts are ignored; tasks change only through the task
    /// service.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] when the identifier is missing or does not
    /// match, when the title is blank, or when the list does not exist.
    /// Returns [`super::TodoServiceError::Repository`] when persistence fails.
    pub async fn update_task_list(
        &self,
        id: TaskListId,
        draft: TaskListDraft,
    ) -> TodoServiceResult<TaskList> {
        let changes =
            validate_update(id, draft).map_err(|reason| rejected("update_task_list", reason))?;
        let not_found = || rejected("update_task_list", InvalidArgument::TaskListNotFound(id));

        let mut task_list = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;
        task_list.apply_changes(changes, &*self.clock);

        self.repository
            .update(&task_list)
            .await
            .map_err(|err| match err {
                TodoRepositoryError::TaskListNotFound(_) => not_found(),
                other => other.into(),
            })?;

        tracing::info!(task_list_id = %id, "updated task list");
        Ok(task_list)
    }

    /// Deletes a task list and every task it owns.
    ///
    /// Deleting an unknown list succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Repository`] when persistence fails.
    pub async fn delete_task_list(&self, id: TaskListId) -> TodoServiceResult<()> {
        if self.repository.delete_by_id(id).await? {
            tracing::info!(task_list_id = %id, "deleted task list");
        } else {
            tracing::debug!(task_list_id = %id, "no task list to delete");
        }
        Ok(())
    }
}

/// Applies the creation rules to a task list draft and its nested tasks.
fn validate_creation(
    draft: TaskListDraft,
) -> Result<(NewTaskList, Vec<NewTask>), InvalidArgument> {
    let TaskListDraft {
        id,
        title,
        description,
        tasks,
    } = draft;

    reject_assigned_id(id.as_ref(), EntityKind::TaskList)?;
    let validated_title = require_title(title, EntityKind::TaskList)?;
    let nested = tasks
        .unwrap_or_default()
        .into_iter()
        .map(new_task_from_draft)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((
        NewTaskList {
            title: validated_title,
            description,
        },
        nested,
    ))
}

/// Applies the update rules to a task list draft.
fn validate_update(
    id: TaskListId,
    draft: TaskListDraft,
) -> Result<TaskListChanges, InvalidArgument> {
    let TaskListDraft {
        id: supplied,
        title,
        description,
        ..
    } = draft;

    require_matching_id(supplied, id, EntityKind::TaskList, TaskListId::into_inner)?;
    let validated_title = require_title(title, EntityKind::TaskList)?;

    Ok(TaskListChanges {
        title: validated_title,
        description,
    })
}
