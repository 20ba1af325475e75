//! Then steps for task list BDD scenarios.

use super::world::{TodoWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use todo_list::todo::{services::TodoServiceError, transfer::TaskListDto};

fn reloaded_summary(world: &TodoWorld) -> Result<TaskListDto, eyre::Report> {
    let task_list_id = world.current_list()?.id();
    let reloaded = run_async(world.task_lists.get_task_list(task_list_id))
        .wrap_err("reload task list")?
        .ok_or_else(|| eyre::eyre!("task list {task_list_id} not found"))?;
    Ok(TaskListDto::from(&reloaded))
}

#[then("the task list has {count:u64} tasks")]
fn task_list_has_count(world: &TodoWorld, count: u64) -> Result<(), eyre::Report> {
    let summary = reloaded_summary(world)?;
    let actual = u64::try_from(summary.count)?;
    eyre::ensure!(actual == count, "expected {count} tasks, found {actual}");
    Ok(())
}

#[then(r#"the task list progress is "{expected}""#)]
fn task_list_progress(world: &TodoWorld, expected: String) -> Result<(), eyre::Report> {
    let wanted: f64 = expected.parse().wrap_err("parse expected progress")?;
    let summary = reloaded_summary(world)?;
    eyre::ensure!(
        summary.progress == Some(wanted),
        "expected progress {wanted}, found {:?}",
        summary.progress
    );
    Ok(())
}

#[then("the task list has no progress")]
fn task_list_without_progress(world: &TodoWorld) -> Result<(), eyre::Report> {
    let summary = reloaded_summary(world)?;
    eyre::ensure!(
        summary.progress.is_none(),
        "expected no progress, found {:?}",
        summary.progress
    );
    Ok(())
}

#[then(r#"the request is rejected with "{message}""#)]
fn request_rejected(world: &TodoWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    match result {
        Err(TodoServiceError::InvalidArgument(reason)) => {
            eyre::ensure!(
                reason.to_string() == message,
                "expected rejection {message:?}, found {reason}"
            );
            Ok(())
        }
        Err(other) => Err(eyre::eyre!("expected a rejection, found {other}")),
        Ok(task) => Err(eyre::eyre!("expected a rejection, created task {}", task.id())),
    }
}

#[then("the task list no longer exists")]
fn task_list_gone(world: &TodoWorld) -> Result<(), eyre::Report> {
    let task_list_id = world.current_list()?.id();
    let found = run_async(world.task_lists.get_task_list(task_list_id))
        .wrap_err("look up deleted task list")?;
    eyre::ensure!(found.is_none(), "task list {task_list_id} still exists");
    Ok(())
}

#[then("no tasks remain for that list")]
fn no_tasks_remain(world: &TodoWorld) -> Result<(), eyre::Report> {
    let task_list_id = world.current_list()?.id();
    let remaining =
        run_async(world.tasks.list_tasks(task_list_id)).wrap_err("list remaining tasks")?;
    eyre::ensure!(
        remaining.is_empty(),
        "expected no tasks, found {}",
        remaining.len()
    );
    for created in &world.created_tasks {
        let lookup = run_async(world.tasks.get_task(task_list_id, created.id()))
            .wrap_err("look up deleted task")?;
        eyre::ensure!(lookup.is_none(), "task {} survived", created.id());
    }
    Ok(())
}
