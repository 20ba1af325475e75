//! Diesel row models and row conversion for todo persistence.

use super::schema::{task_lists, tasks};
use crate::todo::{
    domain::{
        PersistedTaskData, PersistedTaskListData, Task, TaskId, TaskList, TaskListId,
        TaskPriority, TaskStatus, Title,
    },
    ports::{TodoRepositoryError, TodoRepositoryResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task list records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskListRow {
    /// Task list identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task list records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_lists)]
pub struct NewTaskListRow {
    /// Task list identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning task list.
    pub task_list_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Status in storage form.
    pub status: String,
    /// Priority in storage form.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning task list.
    pub task_list_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Status in storage form.
    pub status: String,
    /// Priority in storage form.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable task columns written by an update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesetRow {
    /// Title.
    pub title: String,
    /// Description; `None` clears the column.
    pub description: Option<String>,
    /// Due date; `None` clears the column.
    pub due_date: Option<DateTime<Utc>>,
    /// Status in storage form.
    pub status: String,
    /// Priority in storage form.
    pub priority: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable task list columns written by an update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = task_lists)]
#[diesel(treat_none_as_null = true)]
pub struct TaskListChangesetRow {
    /// Title.
    pub title: String,
    /// Description; `None` clears the column.
    pub description: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&TaskList> for NewTaskListRow {
    fn from(task_list: &TaskList) -> Self {
        Self {
            id: task_list.id().into_inner(),
            title: task_list.title().as_str().to_owned(),
            description: task_list.description().map(str::to_owned),
            created_at: task_list.created_at(),
            updated_at: task_list.updated_at(),
        }
    }
}

impl From<&TaskList> for TaskListChangesetRow {
    fn from(task_list: &TaskList) -> Self {
        Self {
            title: task_list.title().as_str().to_owned(),
            description: task_list.description().map(str::to_owned),
            updated_at: task_list.updated_at(),
        }
    }
}

impl From<&Task> for NewTaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            task_list_id: task.task_list_id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl From<&Task> for TaskChangesetRow {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            updated_at: task.updated_at(),
        }
    }
}

/// Rebuilds a task from its row.
///
/// # Errors
///
/// Returns [`TodoRepositoryError::Persistence`] when stored values no longer
/// satisfy domain rules.
pub fn row_to_task(row: TaskRow) -> TodoRepositoryResult<Task> {
    let TaskRow {
        id,
        task_list_id,
        title,
        description,
        due_date,
        status: persisted_status,
        priority: persisted_priority,
        created_at,
        updated_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TodoRepositoryError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TodoRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        task_list_id: TaskListId::from_uuid(task_list_id),
        title: Title::new(title).map_err(TodoRepositoryError::persistence)?,
        description,
        due_date,
        status,
        priority,
        created_at,
        updated_at,
    }))
}

/// Rebuilds a task list from its row and already-loaded tasks.
///
/// # Errors
///
/// Returns [`TodoRepositoryError::Persistence`] when the stored title is
/// blank.
pub fn row_to_task_list(row: TaskListRow, tasks: Vec<Task>) -> TodoRepositoryResult<TaskList> {
    let TaskListRow {
        id,
        title,
        description,
        created_at,
        updated_at,
    } = row;

    Ok(TaskList::from_persisted(PersistedTaskListData {
        id: TaskListId::from_uuid(id),
        title: Title::new(title).map_err(TodoRepositoryError::persistence)?,
        description,
        tasks: Some(tasks),
        created_at,
        updated_at,
    }))
}
