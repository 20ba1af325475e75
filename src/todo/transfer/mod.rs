//! Wire transfer objects and their conversions to and from the domain.
//!
//! Field names serialize in camelCase; enums use their uppercase names.

mod dto;
mod mapper;

pub use dto::{ErrorResponse, TaskDto, TaskListDto};
