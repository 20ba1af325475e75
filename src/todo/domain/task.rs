//! Task entity and its status and priority types.

use super::{ParseTaskPriorityError, ParseTaskStatusError, TaskId, TaskListId, Title};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Task still needs doing.
    Open,
    /// Task is done.
    Closed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Returns `true` for [`TaskStatus::Closed`].
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Relative importance of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    /// Do first.
    High,
    /// Default priority for new tasks.
    #[default]
    Medium,
    /// Do when time allows.
    Low,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: Title,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Task priority.
    pub priority: TaskPriority,
}

/// Full replacement state applied by a task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Title,
    /// New description.
    pub description: Option<String>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// New priority.
    pub priority: TaskPriority,
    /// New status.
    pub status: TaskStatus,
}

/// A single actionable item owned by one task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    task_list_id: TaskListId,
    title: Title,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning task list.
    pub task_list_id: TaskListId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new open task inside the given task list.
    ///
    /// Both timestamps are set to the same clock reading.
    #[must_use]
    pub fn create(task_list_id: TaskListId, new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = stored_now(clock);
        let NewTask {
            title,
            description,
            due_date,
            priority,
        } = new_task;

        Self {
            id: TaskId::new(),
            task_list_id,
            title,
            description,
            due_date,
            status: TaskStatus::Open,
            priority,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            task_list_id: data.task_list_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning task list identifier.
    #[must_use]
    pub const fn task_list_id(&self) -> TaskListId {
        self.task_list_id
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

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
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

    /// Overwrites the mutable fields and refreshes `updated_at`.
    ///
    /// Identity, owning list and creation timestamp are left untouched.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            title,
            description,
            due_date,
            priority,
            status,
        } = changes;
        self.title = title;
        self.description = description;
        self.due_date = due_date;
        self.priority = priority;
        self.status = status;
        self.touch(clock);
    }

    /// Moves `updated_at` forward to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = stored_now(clock).max(self.updated_at);
    }
}

/// Reads the clock truncated to the microsecond precision kept by storage.
///
/// Entities handed back from a save then compare equal to the reloaded row.
pub(super) fn stored_now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}
