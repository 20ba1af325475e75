//! Domain model for task lists and tasks.
//!
//! A [`TaskList`] exclusively owns its [`Task`]s. Entities are created only
//! through their `create` constructors, mutated only through
//! `apply_changes`, and never expose setters for identity or creation time.

mod draft;
mod error;
mod ids;
mod task;
mod task_list;

pub use draft::{TaskDraft, TaskListDraft};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TodoDomainError};
pub use ids::{TaskId, TaskListId, Title};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskPriority, TaskStatus};
pub use task_list::{NewTaskList, PersistedTaskListData, TaskList, TaskListChanges, progress_of};
