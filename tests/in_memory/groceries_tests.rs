//! End-to-end walk through creating, completing and summarising a list.

use rstest::rstest;
use todo_list::todo::{
    domain::{TaskDraft, TaskPriority, TaskStatus},
    transfer::{TaskDto, TaskListDto},
};

use super::helpers::{TodoServices, services};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_the_only_task_completes_the_list(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let groceries = services.list_titled("Groceries").await?;
    let summary = TaskListDto::from(&groceries);
    eyre::ensure!(summary.id.is_some(), "list id should be generated");
    eyre::ensure!(summary.count == 0, "new list should be empty");
    eyre::ensure!(summary.progress.is_none(), "empty list has no progress");

    let milk = services
        .tasks
        .create_task(groceries.id(), TaskDraft::titled("Milk"))
        .await?;
    eyre::ensure!(milk.status() == TaskStatus::Open, "new task should be open");
    eyre::ensure!(
        milk.priority() == TaskPriority::Medium,
        "new task should default to medium"
    );

    let mut update = TaskDraft::from(TaskDto::from(&milk));
    update.status = Some(TaskStatus::Closed);
    update.priority = Some(TaskPriority::High);
    services
        .tasks
        .update_task(groceries.id(), milk.id(), update)
        .await?;

    let reloaded = services
        .task_lists
        .get_task_list(groceries.id())
        .await?
        .ok_or_else(|| eyre::eyre!("list should still exist"))?;
    let completed = TaskListDto::from(&reloaded);
    eyre::ensure!(completed.count == 1, "list should own one task");
    eyre::ensure!(
        completed.progress == Some(1.0),
        "progress should be complete, got {:?}",
        completed.progress
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn progress_tracks_each_closed_task(services: TodoServices) -> Result<(), eyre::Report> {
    let chores = services.list_titled("Chores").await?;
    let mut created = Vec::new();
    for title in ["Dishes", "Laundry", "Vacuum", "Bins"] {
        created.push(
            services
                .tasks
                .create_task(chores.id(), TaskDraft::titled(title))
                .await?,
        );
    }

    let first = created
        .first()
        .ok_or_else(|| eyre::eyre!("expected a created task"))?;
    let close = TaskDraft::from(TaskDto {
        status: Some(TaskStatus::Closed),
        ..TaskDto::from(first)
    });
    services
        .tasks
        .update_task(chores.id(), first.id(), close)
        .await?;

    let reloaded = services
        .task_lists
        .get_task_list(chores.id())
        .await?
        .ok_or_else(|| eyre::eyre!("list should still exist"))?;
    eyre::ensure!(reloaded.count() == 4, "list should own four tasks");
    eyre::ensure!(
        reloaded.progress() == Some(0.25),
        "one of four closed should be a quarter, got {:?}",
        reloaded.progress()
    );
    Ok(())
}
