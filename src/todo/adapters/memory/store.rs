//! In-memory repositories for task lists and tasks.
//!
//! Both repositories share one state behind a single lock, so cascade deletes
//! and parent-existence checks see a consistent view.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{Task, TaskId, TaskList, TaskListId},
    ports::{TaskListRepository, TaskRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Shared in-memory backing store.
///
/// Hand out repositories with [`InMemoryTodoStore::task_lists`] and
/// [`InMemoryTodoStore::tasks`]; all handles observe the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    // Lists are kept without their task collections; tasks live in `tasks`.
    task_lists: Vec<TaskList>,
    tasks: Vec<Task>,
}

impl InMemoryTodoState {
    fn has_task_list(&self, id: TaskListId) -> bool {
        self.task_lists.iter().any(|list| list.id() == id)
    }

    fn tasks_of(&self, task_list_id: TaskListId) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.task_list_id() == task_list_id)
            .cloned()
            .collect()
    }

    fn hydrate(&self, task_list: &TaskList) -> TaskList {
        task_list
            .clone()
            .with_tasks(Some(self.tasks_of(task_list.id())))
    }
}

impl InMemoryTodoStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a task list repository backed by this store.
    #[must_use]
    pub fn task_lists(&self) -> InMemoryTaskListRepository {
        InMemoryTaskListRepository {
            store: self.clone(),
        }
    }

    /// Returns a task repository backed by this store.
    #[must_use]
    pub fn tasks(&self) -> InMemoryTaskRepository {
        InMemoryTaskRepository {
            store: self.clone(),
        }
    }

    fn read(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Thread-safe in-memory task list repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskListRepository {
    store: InMemoryTodoStore,
}

impl InMemoryTaskListRepository {
    /// Creates a repository over a fresh, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: InMemoryTodoStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over a fresh, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskListRepository for InMemoryTaskListRepository {
    async fn store(&self, task_list: &TaskList) -> TodoRepositoryResult<()> {
        let mut state = self.store.write()?;
        if state.has_task_list(task_list.id()) {
            return Err(TodoRepositoryError::DuplicateTaskList(task_list.id()));
        }

        let owned = task_list.tasks().unwrap_or_default();
        if let Some(duplicate) = owned
            .iter()
            .find(|task| state.tasks.iter().any(|stored| stored.id() == task.id()))
        {
            return Err(TodoRepositoryError::DuplicateTask(duplicate.id()));
        }

        state.tasks.extend(owned.iter().cloned());
        state.task_lists.push(task_list.clone().with_tasks(None));
        Ok(())
    }

    async fn update(&self, task_list: &TaskList) -> TodoRepositoryResult<()> {
        let mut state = self.store.write()?;
        let stored = state
            .task_lists
            .iter_mut()
            .find(|stored| stored.id() == task_list.id())
            .ok_or(TodoRepositoryError::TaskListNotFound(task_list.id()))?;
        *stored = task_list.clone().with_tasks(None);
        Ok(())
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<TaskList>> {
        let state = self.store.read()?;
        Ok(state
            .task_lists
            .iter()
            .map(|task_list| state.hydrate(task_list))
            .collect())
    }

    async fn find_by_id(&self, id: TaskListId) -> TodoRepositoryResult<Option<TaskList>> {
        let state = self.store.read()?;
        Ok(state
            .task_lists
            .iter()
            .find(|task_list| task_list.id() == id)
            .map(|task_list| state.hydrate(task_list)))
    }

    async fn delete_by_id(&self, id: TaskListId) -> TodoRepositoryResult<bool> {
        let mut state = self.store.write()?;
        let before = state.task_lists.len();
        state.tasks.retain(|task| task.task_list_id() != id);
        state.task_lists.retain(|task_list| task_list.id() != id);
        Ok(state.task_lists.len() < before)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TodoRepositoryResult<()> {
        let mut state = self.store.write()?;
        if !state.has_task_list(task.task_list_id()) {
            return Err(TodoRepositoryError::TaskListNotFound(task.task_list_id()));
        }
        if state.tasks.iter().any(|stored| stored.id() == task.id()) {
            return Err(TodoRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.push(task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TodoRepositoryResult<()> {
        let mut state = self.store.write()?;
        let stored = state
            .tasks
            .iter_mut()
            .find(|stored| {
                stored.id() == task.id() && stored.task_list_id() == task.task_list_id()
            })
            .ok_or(TodoRepositoryError::TaskNotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_task_list_id(
        &self,
        task_list_id: TaskListId,
    ) -> TodoRepositoryResult<Vec<Task>> {
        let state = self.store.read()?;
        Ok(state.tasks_of(task_list_id))
    }

    async fn find_by_task_list_id_and_id(
        &self,
        task_list_id: TaskListId,
        id: TaskId,
    ) -> TodoRepositoryResult<Option<Task>> {
        let state = self.store.read()?;
        Ok(state
            .tasks
            .iter()
            .find(|task| task.id() == id && task.task_list_id() == task_list_id)
            .cloned())
    }

    async fn delete_by_task_list_id_and_id(
        &self,
        task_list_id: TaskListId,
        id: TaskId,
    ) -> TodoRepositoryResult<bool> {
        let mut state = self.store.write()?;
        let position = state
            .tasks
            .iter()
            .position(|task| task.id() == id && task.task_list_id() == task_list_id);
        Ok(position.map(|index| state.tasks.remove(index)).is_some())
    }
}
