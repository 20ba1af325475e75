//! `PostgreSQL` adapters for task list and task persistence.
//!
//! All Diesel calls run on [`tokio::task::spawn_blocking`]. Multi-row effects
//! (cascade delete, list creation with nested tasks, task creation with its
//! parent check) each run inside a single transaction.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskListRepository, PostgresTaskRepository, TodoPgPool};
