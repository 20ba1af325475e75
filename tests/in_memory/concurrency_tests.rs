//! Concurrent access through cloned services sharing one store.

use rstest::rstest;
use todo_list::todo::domain::TaskDraft;

use super::helpers::{TodoServices, services};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_task_creation_keeps_every_task(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let list = services.list_titled("Busy").await?;
    let mut handles = Vec::new();
    for index in 0..16 {
        let tasks = services.tasks.clone();
        let list_id = list.id();
        handles.push(tokio::spawn(async move {
            tasks
                .create_task(list_id, TaskDraft::titled(format!("Task {index}")))
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let stored = services.tasks.list_tasks(list.id()).await?;
    eyre::ensure!(stored.len() == 16, "expected 16 tasks, found {}", stored.len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_racing_with_list_deletion_leaves_no_orphans(
    services: TodoServices,
) -> Result<(), eyre::Report> {
    let list = services.list_titled("Racing").await?;
    let tasks = services.tasks.clone();
    let list_id = list.id();
    let creator = tokio::spawn(async move {
        for index in 0..32 {
            // Rejections are expected once the list has gone.
            if tasks
                .create_task(list_id, TaskDraft::titled(format!("Task {index}")))
                .await
                .is_err()
            {
                break;
            }
        }
    });

    services.task_lists.delete_task_list(list_id).await?;
    creator.await?;

    eyre::ensure!(
        services.tasks.list_tasks(list_id).await?.is_empty(),
        "no task may outlive its list"
    );
    Ok(())
}
