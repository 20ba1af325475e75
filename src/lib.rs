//! Todo list core: task lists, tasks, and their persistence.
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: entities, identifiers and drafts with no infrastructure
//!   dependencies
//! - **Ports**: async repository traits
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: validation and orchestration of create, update, read and
//!   delete operations
//! - **Transfer**: wire objects with derived `count` and `progress`
//!
//! # Modules
//!
//! - [`todo`]: the task list bounded context
//! - [`config`]: database settings and pool construction

pub mod config;
pub mod todo;
