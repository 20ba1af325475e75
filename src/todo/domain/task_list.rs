//! Task list aggregate root and progress derivation.

use super::{NewTask, Task, TaskListId, TaskStatus, Title, task::stored_now};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Validated input for creating a task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskList {
    /// List title.
    pub title: Title,
    /// Optional free-form description.
    pub description: Option<String>,
}

/// Replacement state applied by a task list update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListChanges {
    /// New title.
    pub title: Title,
    /// New description.
    pub description: Option<String>,
}

/// Named collection of tasks; the unit of cascade deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    id: TaskListId,
    title: Title,
    description: Option<String>,
    tasks: Option<Vec<Task>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskListData {
    /// Persisted identifier.
    pub id: TaskListId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description.
    pub description: Option<String>,
    /// Owned tasks, or `None` when they were not loaded.
    pub tasks: Option<Vec<Task>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskList {
    /// Creates a new, empty task list.
    #[must_use]
    pub fn create(new_list: NewTaskList, clock: &impl Clock) -> Self {
        let timestamp = stored_now(clock);
        Self {
            id: TaskListId::new(),
            title: new_list.title,
            description: new_list.description,
            tasks: Some(Vec::new()),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskListData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            tasks: data.tasks,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> TaskListId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owned tasks, or `None` when the collection is absent.
    #[must_use]
    pub fn tasks(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Number of owned tasks; zero when the collection is absent.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.as_ref().map_or(0, Vec::len)
    }

    /// Fraction of owned tasks that are closed.
    ///
    /// Returns `None` when the collection is absent or empty.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        let tasks = self.tasks.as_deref()?;
        progress_of(tasks.iter().map(|task| Some(task.status())))
    }

    /// Creates an open task owned by this list and appends it.
    pub fn add_task(&mut self, new_task: NewTask, clock: &impl Clock) {
        let task = Task::create(self.id, new_task, clock);
        self.tasks.get_or_insert_with(Vec::new).push(task);
    }

    /// Overwrites the title and description and refreshes `updated_at`.
    pub fn apply_changes(&mut self, changes: TaskListChanges, clock: &impl Clock) {
        self.title = changes.title;
        self.description = changes.description;
        self.updated_at = stored_now(clock).max(self.updated_at);
    }

    /// Replaces the loaded task collection.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Option<Vec<Task>>) -> Self {
        self.tasks = tasks;
        self
    }
}

/// Closed-task ratio over a sequence of statuses.
///
/// Missing statuses count as not closed. Returns `None` for an empty
/// sequence so callers never see a division by zero.
#[must_use]
pub fn progress_of(statuses: impl IntoIterator<Item = Option<TaskStatus>>) -> Option<f64> {
    let (total, closed) = statuses
        .into_iter()
        .fold((0_u32, 0_u32), |(total, closed), status| {
            let is_closed = status.is_some_and(TaskStatus::is_closed);
            (
                total.saturating_add(1),
                closed.saturating_add(u32::from(is_closed)),
            )
        });
    if total == 0 {
        return None;
    }
    #[expect(
        clippy::float_arithmetic,
        reason = "progress is defined as the ratio of closed to total tasks"
    )]
    let ratio = f64::from(closed) / f64::from(total);
    Some(ratio)
}
