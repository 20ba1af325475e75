//! Application services for task lists and tasks.
//!
//! Services validate drafts, create or mutate domain entities, and delegate
//! persistence to the repository ports. They never retry and never cache.

mod error;
mod task;
mod task_list;
mod validation;

pub use error::{EntityKind, InvalidArgument, TodoServiceError, TodoServiceResult};
pub use task::TaskService;
pub use task_list::TaskListService;
