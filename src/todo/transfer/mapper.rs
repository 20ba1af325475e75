//! Conversions between transfer objects, drafts and entities.

use super::{ErrorResponse, TaskDto, TaskListDto};
use crate::todo::{
    domain::{Task, TaskDraft, TaskList, TaskListDraft, progress_of},
    services::TodoServiceError,
};

const BAD_REQUEST: u16 = 400;
const INTERNAL_SERVER_ERROR: u16 = 500;

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id()),
            title: Some(task.title().as_str().to_owned()),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            priority: Some(task.priority()),
            status: Some(task.status()),
        }
    }
}

impl From<TaskDto> for TaskDraft {
    fn from(dto: TaskDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            due_date: dto.due_date,
            priority: dto.priority,
            status: dto.status,
        }
    }
}

impl From<TaskDraft> for TaskDto {
    fn from(draft: TaskDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
        }
    }
}

impl From<&TaskList> for TaskListDto {
    fn from(task_list: &TaskList) -> Self {
        Self {
            id: Some(task_list.id()),
            title: Some(task_list.title().as_str().to_owned()),
            description: task_list.description().map(str::to_owned),
            count: task_list.count(),
            progress: task_list.progress(),
            tasks: task_list
                .tasks()
                .map(|tasks| tasks.iter().map(TaskDto::from).collect()),
        }
    }
}

impl From<TaskListDto> for TaskListDraft {
    fn from(dto: TaskListDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            tasks: dto
                .tasks
                .map(|tasks| tasks.into_iter().map(TaskDraft::from).collect()),
        }
    }
}

impl From<TaskListDraft> for TaskListDto {
    fn from(draft: TaskListDraft) -> Self {
        let count = draft.tasks.as_ref().map_or(0, Vec::len);
        let progress = draft
            .tasks
            .as_ref()
            .and_then(|tasks| progress_of(tasks.iter().map(|task| task.status)));
        Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            count,
            progress,
            tasks: draft
                .tasks
                .map(|tasks| tasks.into_iter().map(TaskDto::from).collect()),
        }
    }
}

impl From<&TodoServiceError> for ErrorResponse {
    fn from(err: &TodoServiceError) -> Self {
        match err {
            TodoServiceError::InvalidArgument(reason) => Self {
                status: BAD_REQUEST,
                message: reason.to_string(),
                details: "invalid argument".to_owned(),
            },
            TodoServiceError::Repository(_) => Self {
                status: INTERNAL_SERVER_ERROR,
                message: "an unexpected error occurred".to_owned(),
                details: "internal error".to_owned(),
            },
        }
    }
}
