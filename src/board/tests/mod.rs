
use crate::task::domain::{PersistedTaskData, Platform, Stage, Task, TaskDraft, TaskId};
use chrono::Utc;

/// Builds a persisted task with the given title, platform, and stage.
fn task(title: &str, platform: Platform, status: Stage) -> Task {
    let mut fields = TaskDraft::new_idea();
    fields.title = title.to_owned();
    fields.platform = platform;
    fields.status = status;
    let now = Utc::now();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        fields,
        created_at: now,
        updated_at: now,
    })
}
