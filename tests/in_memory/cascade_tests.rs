//! Cascade deletion and delete-idempotence through the services.

use mockable::DefaultClock;
use rstest::rstest;
use todo_list::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{
        NewTask, NewTaskList, TaskDraft, TaskId, TaskList, TaskListDraft, TaskListId,
        TaskPriority, Title,
    },
    ports::{TaskListRepository, TaskRepository},
};

use super::helpers::{TodoServices, services};

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_removes_all_of_its_tasks(
    services: TodoServices,
    #[case] task_count: usize,
) -> Result<(), eyre::Report> {
    let drafts = (0..task_count).map(|index| TaskDraft::titled(format!("Task {index}")));
    let doomed = services
        .task_lists
        .create_task_list(TaskListDraft::titled("Doomed").with_tasks(drafts))
        .await?;
    let keeper = services.list_titled("Keeper").await?;
    services
        .tasks
        .create_task(keeper.id(), TaskDraft::titled("Survivor"))
        .await?;
    eyre::ensure!(doomed.count() == task_count, "nested tasks should be stored");

    services.task_lists.delete_task_list(doomed.id()).await?;

    eyre::ensure!(
        services.task_lists.get_task_list(doomed.id()).await?.is_none(),
        "deleted list should be gone"
    );
    eyre::ensure!(
        services.tasks.list_tasks(doomed.id()).await?.is_empty(),
        "tasks of the deleted list should be gone"
    );
    eyre::ensure!(
        services.tasks.list_tasks(keeper.id()).await?.len() == 1,
        "other lists should keep their tasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_unknown_entities_changes_nothing(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let list = services.list_titled("Groceries").await?;
    let milk = services
        .tasks
        .create_task(list.id(), TaskDraft::titled("Milk"))
        .await?;

    services.tasks.delete_task(list.id(), TaskId::new()).await?;
    services.task_lists.delete_task_list(TaskListId::new()).await?;

    let remaining = services.tasks.list_tasks(list.id()).await?;
    eyre::ensure!(remaining == vec![milk], "existing task should be untouched");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_deletes_report_whether_anything_was_removed() -> Result<(), eyre::Report> {
    let store = InMemoryTodoStore::new();
    let (task_lists, tasks) = (store.task_lists(), store.tasks());
    let mut list = TaskList::create(
        NewTaskList {
            title: Title::new("Groceries")?,
            description: None,
        },
        &DefaultClock,
    );
    list.add_task(
        NewTask {
            title: Title::new("Milk")?,
            description: None,
            due_date: None,
            priority: TaskPriority::default(),
        },
        &DefaultClock,
    );
    task_lists.store(&list).await?;
    let milk_id = list
        .tasks()
        .and_then(<[_]>::first)
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("milk should be added"))?;

    eyre::ensure!(
        !tasks
            .delete_by_task_list_id_and_id(list.id(), TaskId::new())
            .await?,
        "unknown task should not be reported as removed"
    );
    eyre::ensure!(
        tasks.delete_by_task_list_id_and_id(list.id(), milk_id).await?,
        "stored task should be reported as removed"
    );
    eyre::ensure!(
        !task_lists.delete_by_id(TaskListId::new()).await?,
        "unknown list should not be reported as removed"
    );
    eyre::ensure!(
        task_lists.delete_by_id(list.id()).await?,
        "stored list should be reported as removed"
    );
    eyre::ensure!(
        !task_lists.delete_by_id(list.id()).await?,
        "second delete should find nothing"
    );
    Ok(())
}
