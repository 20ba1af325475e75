//! Shared fixtures for todo unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::todo::{
    adapters::memory::{InMemoryTaskListRepository, InMemoryTaskRepository, InMemoryTodoStore},
    services::{InvalidArgument, TaskListService, TaskService, TodoServiceError, TodoServiceResult},
};

/// Clock whose reading only changes when a test sets it.
#[derive(Debug)]
pub(super) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(super) const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock should not be poisoned") = now;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock should not be poisoned")
    }
}

/// Returns 2026-10-18 at the given hour, UTC.
pub(super) fn at_hour(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Both services wired to one in-memory store and one manual clock.
pub(super) struct Harness {
    pub(super) clock: Arc<ManualClock>,
    pub(super) task_lists: TaskListService<InMemoryTaskListRepository, ManualClock>,
    pub(super) tasks: TaskService<InMemoryTaskRepository, ManualClock>,
}

#[fixture]
pub(super) fn harness() -> Harness {
    let store = InMemoryTodoStore::new();
    let clock = Arc::new(ManualClock::at(at_hour(9)));
    Harness {
        task_lists: TaskListService::new(Arc::new(store.task_lists()), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::new(store.tasks()), Arc::clone(&clock)),
        clock,
    }
}

/// Unwraps the validation failure of a rejected service call.
pub(super) fn rejection<T: std::fmt::Debug>(result: TodoServiceResult<T>) -> InvalidArgument {
    match result {
        Err(TodoServiceError::InvalidArgument(reason)) => reason,
        other => panic!("expected an invalid argument, got {other:?}"),
    }
}
