//! `PostgreSQL` record service implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        DueDate, OwnerId, PersistedTaskData, Platform, Stage, Task, TaskDraft, TaskId,
        TaskMetadata,
    },
    ports::{TaskRecordError, TaskRecordResult, TaskRecords},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskRecordError::Persistence`] when the pool cannot be created.
pub fn build_pool(database_url: &str, max_size: u32) -> TaskRecordResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(TaskRecordError::persistence)
}

/// `PostgreSQL`-backed task record service.
#[derive(Debug, Clone)]
pub struct PostgresTaskRecords {
    pool: TaskPgPool,
}

impl PostgresTaskRecords {
    /// Creates a new record service from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRecordResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRecordResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRecordError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRecordError::persistence)?
    }
}

#[async_trait]
impl TaskRecords for PostgresTaskRecords {
    async fn list(&self, owner: &OwnerId) -> TaskRecordResult<Vec<Task>> {
        let user_id = owner.into_inner();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(user_id))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRecordError::persistence)?;
            Ok(readable_tasks(rows))
        })
        .await
    }

    async fn insert(&self, owner: &OwnerId, draft: &TaskDraft) -> TaskRecordResult<Task> {
        let new_row = EncodedFields::encode(draft)?.into_new_row(*owner);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRecordError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, owner: &OwnerId, task: &Task) -> TaskRecordResult<()> {
        let task_id = task.id();
        let user_id = owner.into_inner();
        let changeset = EncodedFields::encode(&task.to_draft())?.into_changeset(task);
        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::user_id.eq(user_id)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRecordError::persistence)?;
            if affected == 0 {
                return Err(TaskRecordError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRecordResult<()> {
        let user_id = owner.into_inner();
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::user_id.eq(user_id)),
            )
            .execute(connection)
            .map_err(TaskRecordError::persistence)?;
            if affected == 0 {
                return Err(TaskRecordError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Column values shared by inserts and full-record updates.
struct EncodedFields {
    title: String,
    platform: String,
    priority: Value,
    status: String,
    description: String,
    checklist: Value,
    is_stagnant: bool,
    due_date: Option<NaiveDate>,
    comments: i32,
    attachments: i32,
    tags: Value,
    assignee_avatar: Option<String>,
    image: Option<String>,
    display_date: Option<String>,
}

impl EncodedFields {
    fn encode(draft: &TaskDraft) -> TaskRecordResult<Self> {
        let TaskDraft {
            title,
            platform,
            priority,
            status,
            description,
            checklist,
            due_date,
            is_stagnant,
            metadata,
        } = draft;

        Ok(Self {
            title: title.clone(),
            platform: platform.as_str().to_owned(),
            priority: serde_json::to_value(priority).map_err(TaskRecordError::persistence)?,
            status: status.as_str().to_owned(),
            description: description.clone(),
            checklist: serde_json::to_value(checklist).map_err(TaskRecordError::persistence)?,
            is_stagnant: *is_stagnant,
            due_date: due_date.map(DueDate::date),
            comments: saturating_counter(metadata.comments),
            attachments: saturating_counter(metadata.attachments),
            tags: serde_json::to_value(&metadata.tags).map_err(TaskRecordError::persistence)?,
            assignee_avatar: metadata.assignee_avatar.clone(),
            image: metadata.image.clone(),
            display_date: metadata.date.clone(),
        })
    }

    fn into_new_row(self, owner: OwnerId) -> NewTaskRow {
        NewTaskRow {
            user_id: owner.into_inner(),
            title: self.title,
            platform: self.platform,
            priority: self.priority,
            status: self.status,
            description: self.description,
            checklist: self.checklist,
            is_stagnant: self.is_stagnant,
            due_date: self.due_date,
            comments: self.comments,
            attachments: self.attachments,
            tags: self.tags,
            assignee_avatar: self.assignee_avatar,
            image: self.image,
            display_date: self.display_date,
        }
    }

    fn into_changeset(self, task: &Task) -> TaskChangeset {
        TaskChangeset {
            title: self.title,
            platform: self.platform,
            priority: self.priority,
            status: self.status,
            description: self.description,
            checklist: self.checklist,
            is_stagnant: self.is_stagnant,
            due_date: self.due_date,
            comments: self.comments,
            attachments: self.attachments,
            tags: self.tags,
            assignee_avatar: self.assignee_avatar,
            image: self.image,
            display_date: self.display_date,
            updated_at: task.updated_at(),
        }
    }
}

fn saturating_counter(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn stored_counter(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

/// Maps listed rows, skipping any that no longer decode so one bad row
/// cannot keep the whole board from loading.
fn readable_tasks(rows: Vec<TaskRow>) -> Vec<Task> {
    rows.into_iter()
        .filter_map(|row| match row_to_task(row) {
            Ok(task) => Some(task),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable task row");
                None
            }
        })
        .collect()
}

fn row_to_task(row: TaskRow) -> TaskRecordResult<Task> {
    let TaskRow {
        id,
        title,
        platform,
        priority,
        status,
        description,
        checklist,
        is_stagnant,
        due_date,
        comments,
        attachments,
        tags,
        assignee_avatar,
        image,
        display_date,
        created_at,
        updated_at,
        ..
    } = row;
    let task_id = TaskId::from_uuid(id);
    let corrupt = |reason: String| TaskRecordError::CorruptRecord {
        id: task_id,
        reason,
    };

    let fields = TaskDraft {
        title,
        platform: Platform::try_from(platform.as_str()).map_err(|err| corrupt(err.to_string()))?,
        priority: serde_json::from_value(priority).map_err(|err| corrupt(err.to_string()))?,
        status: Stage::try_from(status.as_str()).map_err(|err| corrupt(err.to_string()))?,
        description,
        checklist: serde_json::from_value(checklist).map_err(|err| corrupt(err.to_string()))?,
        due_date: due_date.map(DueDate::from_date),
        is_stagnant,
        metadata: TaskMetadata {
            comments: stored_counter(comments),
            attachments: stored_counter(attachments),
            tags: serde_json::from_value(tags).map_err(|err| corrupt(err.to_string()))?,
            assignee_avatar,
            image,
            date: display_date,
        },
    };

    Ok(Task::from_persisted(PersistedTaskData {
        id: task_id,
        fields,
        created_at,
        updated_at,
    }))
}
