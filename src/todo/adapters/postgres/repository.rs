//! `PostgreSQL` repository implementations for task lists and tasks.

use super::{
    models::{
        NewTaskListRow, NewTaskRow, TaskChangesetRow, TaskListChangesetRow, TaskListRow, TaskRow,
        row_to_task, row_to_task_list,
    },
    schema::{task_lists, tasks},
};
use crate::todo::{
    domain::{Task, TaskId, TaskList, TaskListId},
    ports::{TaskListRepository, TaskRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for TodoRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// Runs a Diesel closure on the blocking thread pool with a pooled connection.
async fn run_blocking<F, T>(pool: &TodoPgPool, f: F) -> TodoRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(TodoRepositoryError::persistence)?;

    if let Err(TodoRepositoryError::Persistence(err)) = &result {
        tracing::warn!(error = %err, "todo persistence operation failed");
    }
    result
}

/// `PostgreSQL`-backed task list repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskListRepository {
    pool: TodoPgPool,
}

impl PostgresTaskListRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TodoPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskListRepository for PostgresTaskListRepository {
    async fn store(&self, task_list: &TaskList) -> TodoRepositoryResult<()> {
        let task_list_id = task_list.id();
        let list_row = NewTaskListRow::from(task_list);
        let task_rows: Vec<NewTaskRow> = task_list
            .tasks()
            .unwrap_or_default()
            .iter()
            .map(NewTaskRow::from)
            .collect();

        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, TodoRepositoryError, _>(|tx| {
                diesel::insert_into(task_lists::table)
                    .values(&list_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TodoRepositoryError::DuplicateTaskList(task_list_id)
                        }
                        _ => TodoRepositoryError::persistence(err),
                    })?;
                for row in &task_rows {
                    insert_task_row(tx, row)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, task_list: &TaskList) -> TodoRepositoryResult<()> {
        let task_list_id = task_list.id();
        let changes = TaskListChangesetRow::from(task_list);

        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(
                task_lists::table.filter(task_lists::id.eq(task_list_id.into_inner())),
            )
            .set(&changes)
            .execute(connection)?;
            if updated == 0 {
                return Err(TodoRepositoryError::TaskListNotFound(task_list_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, TodoRepositoryError, _>(|tx| {
                let list_rows = task_lists::table
                    .order(task_lists::position.asc())
                    .select(TaskListRow::as_select())
                    .load::<TaskListRow>(tx)?;
                let list_ids: Vec<uuid::Uuid> = list_rows.iter().map(|row| row.id).collect();
                let task_rows = tasks::table
                    .filter(tasks::task_list_id.eq_any(list_ids))
                    .order(tasks::position.asc())
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(tx)?;

                let mut grouped: HashMap<uuid::Uuid, Vec<Task>> = HashMap::new();
                for row in task_rows {
                    let owner = row.task_list_id;
                    grouped.entry(owner).or_default().push(row_to_task(row)?);
                }

                list_rows
                    .into_iter()
                    .map(|row| {
                        let owned = grouped.remove(&row.id).unwrap_or_default();
                        row_to_task_list(row, owned)
                    })
                    .collect()
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskListId) -> TodoRepositoryResult<Option<TaskList>> {
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, TodoRepositoryError, _>(|tx| {
                let Some(row) = task_lists::table
                    .filter(task_lists::id.eq(id.into_inner()))
                    .select(TaskListRow::as_select())
                    .first::<TaskListRow>(tx)
                    .optional()?
                else {
                    return Ok(None);
                };
                let owned = load_tasks_of(tx, id)?;
                row_to_task_list(row, owned).map(Some)
            })
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskListId) -> TodoRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, TodoRepositoryError, _>(|tx| {
                // Blocks task inserts holding a key-share lock on the same row.
                let locked = task_lists::table
                    .filter(task_lists::id.eq(id.into_inner()))
                    .select(task_lists::id)
                    .for_update()
                    .first::<uuid::Uuid>(tx)
                    .optional()?;
                if locked.is_none() {
                    return Ok(false);
                }
                let removed_tasks = diesel::delete(
                    tasks::table.filter(tasks::task_list_id.eq(id.into_inner())),
                )
                .execute(tx)?;
                let removed_lists =
                    diesel::delete(task_lists::table.filter(task_lists::id.eq(id.into_inner())))
                        .execute(tx)?;
                tracing::debug!(task_list_id = %id, removed_tasks, "cascade-deleted task list");
                Ok(removed_lists > 0)
            })
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TodoRepositoryResult<()> {
        let task_list_id = task.task_list_id();
        let new_row = NewTaskRow::from(task);

        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, TodoRepositoryError, _>(|tx| {
                // Key-share lock keeps the parent alive until the insert commits.
                let parent = task_lists::table
                    .filter(task_lists::id.eq(task_list_id.into_inner()))
                    .select(task_lists::id)
                    .for_key_share()
                    .first::<uuid::Uuid>(tx)
                    .optional()?;
                if parent.is_none() {
                    return Err(TodoRepositoryError::TaskListNotFound(task_list_id));
                }
                insert_task_row(tx, &new_row)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TodoRepositoryResult<()> {
        let task_id = task.id();
        let task_list_id = task.task_list_id();
        let changes = TaskChangesetRow::from(task);

        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::task_list_id.eq(task_list_id.into_inner())),
            )
            .set(&changes)
            .execute(connection)?;
            if updated == 0 {
                return Err(TodoRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_task_list_id(
        &self,
        task_list_id: TaskListId,
    ) -> TodoRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            load_tasks_of(connection, task_list_id)
        })
        .await
    }

    async fn find_by_task_list_id_and_id(
        &self,
        task_list_id: TaskListId,
        id: TaskId,
    ) -> TodoRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::task_list_id.eq(task_list_id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete_by_task_list_id_and_id(
        &self,
        task_list_id: TaskListId,
        id: TaskId,
    ) -> TodoRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            let removed = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::task_list_id.eq(task_list_id.into_inner())),
            )
            .execute(connection)?;
            Ok(removed > 0)
        })
        .await
    }
}

fn load_tasks_of(
    connection: &mut PgConnection,
    task_list_id: TaskListId,
) -> TodoRepositoryResult<Vec<Task>> {
    tasks::table
        .filter(tasks::task_list_id.eq(task_list_id.into_inner()))
        .order(tasks::position.asc())
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)?
        .into_iter()
        .map(row_to_task)
        .collect()
}

fn insert_task_row(connection: &mut PgConnection, row: &NewTaskRow) -> TodoRepositoryResult<()> {
    diesel::insert_into(tasks::table)
        .values(row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                TodoRepositoryError::DuplicateTask(TaskId::from_uuid(row.id))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                TodoRepositoryError::TaskListNotFound(TaskListId::from_uuid(row.task_list_id))
            }
            _ => TodoRepositoryError::persistence(err),
        })?;
    Ok(())
}
