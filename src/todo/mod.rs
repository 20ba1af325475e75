//! Task list management.
//!
//! A task list owns an ordered collection of tasks. Deleting a list deletes
//! its tasks; a task can only be created inside an existing list. Lists
//! expose a derived `count` and a `progress` ratio of closed tasks.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod transfer;
