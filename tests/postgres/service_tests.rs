//! Service behaviour against the `PostgreSQL` adapters.

use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use todo_list::todo::{
    domain::{TaskDraft, TaskListDraft, TaskListId, TaskPriority, TaskStatus},
    services::{InvalidArgument, TodoServiceError},
    transfer::TaskListDto,
};

use super::helpers::{BoxError, TestDatabase, test_runtime};

#[rstest]
fn closing_milk_completes_groceries(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let database = TestDatabase::create(shared_test_cluster)?;
    let (task_lists, tasks) = database.services();

    test_runtime()?.block_on(async {
        let groceries = task_lists
            .create_task_list(TaskListDraft::titled("Groceries"))
            .await?;
        let milk = tasks
            .create_task(groceries.id(), TaskDraft::titled("Milk"))
            .await?;
        assert_eq!(milk.status(), TaskStatus::Open);
        assert_eq!(milk.priority(), TaskPriority::Medium);

        tasks
            .update_task(
                groceries.id(),
                milk.id(),
                TaskDraft::titled("Milk")
                    .with_id(milk.id())
                    .with_status(TaskStatus::Closed)
                    .with_priority(TaskPriority::High),
            )
            .await?;

        let reloaded = task_lists
            .get_task_list(groceries.id())
            .await?
            .ok_or("groceries should exist")?;
        let dto = TaskListDto::from(&reloaded);
        assert_eq!(dto.count, 1);
        assert_eq!(dto.progress, Some(1.0));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn task_creation_time_survives_reload_and_update(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let database = TestDatabase::create(shared_test_cluster)?;
    let (task_lists, tasks) = database.services();

    test_runtime()?.block_on(async {
        let groceries = task_lists
            .create_task_list(TaskListDraft::titled("Groceries"))
            .await?;
        let milk = tasks
            .create_task(groceries.id(), TaskDraft::titled("Milk"))
            .await?;

        let fetched = tasks
            .get_task(groceries.id(), milk.id())
            .await?
            .ok_or("milk should exist")?;
        let updated = tasks
            .update_task(
                groceries.id(),
                milk.id(),
                TaskDraft::titled("Milk")
                    .with_id(milk.id())
                    .with_status(TaskStatus::Closed)
                    .with_priority(TaskPriority::High),
            )
            .await?;

        assert_eq!(fetched, milk);
        assert_eq!(updated.id(), milk.id());
        assert_eq!(updated.created_at(), milk.created_at());
        assert!(updated.updated_at() >= milk.updated_at());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn creating_a_task_in_an_unknown_list_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let database = TestDatabase::create(shared_test_cluster)?;
    let (_, tasks) = database.services();
    let missing = TaskListId::new();

    let result = test_runtime()?.block_on(tasks.create_task(missing, TaskDraft::titled("Milk")));

    assert!(matches!(
        result,
        Err(TodoServiceError::InvalidArgument(InvalidArgument::UnknownTaskList(id))) if id == missing
    ));
    Ok(())
}

#[rstest]
fn list_update_keeps_tasks_and_creation_time(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    let database = TestDatabase::create(shared_test_cluster)?;
    let (task_lists, _) = database.services();

    test_runtime()?.block_on(async {
        let created = task_lists
            .create_task_list(
                TaskListDraft::titled("Groceries").with_tasks([TaskDraft::titled("Milk")]),
            )
            .await?;

        let updated = task_lists
            .update_task_list(
                created.id(),
                TaskListDraft::titled("Weekly groceries")
                    .with_id(created.id())
                    .with_description("Saturdays"),
            )
            .await?;
        let listed = task_lists.list_task_lists().await?;

        assert_eq!(updated.title().as_str(), "Weekly groceries");
        assert_eq!(updated.description(), Some("Saturdays"));
        assert_eq!(updated.count(), 1);
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at() >= created.updated_at());
        assert_eq!(listed, [updated]);
        Ok::<(), BoxError>(())
    })
}
