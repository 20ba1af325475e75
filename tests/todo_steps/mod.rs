//! Step definitions for task list behaviour scenarios.

pub mod then;
