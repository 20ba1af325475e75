//! Draft validation shared by the task and task list services.

use super::error::{EntityKind, InvalidArgument};
use crate::todo::domain::{NewTask, TaskDraft, Title};

/// Rejects a draft that claims an identifier on creation.
pub(super) const fn reject_assigned_id<T>(
    id: Option<&T>,
    kind: EntityKind,
) -> Result<(), InvalidArgument> {
    if id.is_some() {
        return Err(InvalidArgument::IdAlreadyAssigned(kind));
    }
    Ok(())
}

/// Requires a present, non-blank title.
pub(super) fn require_title(
    title: Option<String>,
    kind: EntityKind,
) -> Result<Title, InvalidArgument> {
    title
        .and_then(|value| Title::new(value).ok())
        .ok_or(InvalidArgument::EmptyTitle(kind))
}

/// Requires the draft identifier to be present and equal to the addressed one.
pub(super) fn require_matching_id<T>(
    supplied: Option<T>,
    expected: T,
    kind: EntityKind,
    as_uuid: impl Fn(T) -> uuid::Uuid,
) -> Result<(), InvalidArgument>
where
    T: Copy + PartialEq,
{
    let supplied_id = supplied.ok_or(InvalidArgument::MissingId(kind))?;
    if supplied_id != expected {
        return Err(InvalidArgument::IdMismatch {
            kind,
            expected: as_uuid(expected),
            supplied: as_uuid(supplied_id),
        });
    }
    Ok(())
}

/// Applies the creation rules to a task draft.
///
/// The draft must not carry an identifier and must have a non-blank title.
/// Priority falls back to medium; any supplied status is discarded because
/// new tasks always start open.
pub(super) fn new_task_from_draft(draft: TaskDraft) -> Result<NewTask, InvalidArgument> {
    let TaskDraft {
        id,
        title,
        description,
        due_date,
        priority,
        ..
    } = draft;

    reject_assigned_id(id.as_ref(), EntityKind::Task)?;
    let validated_title = require_title(title, EntityKind::Task)?;

    Ok(NewTask {
        title: validated_title,
        description,
        due_date,
        priority: priority.unwrap_or_default(),
    })
}
