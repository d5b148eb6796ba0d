//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning identity.
    pub user_id: uuid::Uuid,
    /// Display title.
    pub title: String,
    /// Platform storage string.
    pub platform: String,
    /// Priority tags JSON array.
    pub priority: Value,
    /// Stage storage string.
    pub status: String,
    /// Description.
    pub description: String,
    /// Checklist JSON array.
    pub checklist: Value,
    /// Re-engagement flag.
    pub is_stagnant: bool,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Comment counter.
    pub comments: i32,
    /// Attachment counter.
    pub attachments: i32,
    /// Labels JSON array.
    pub tags: Value,
    /// Assignee avatar URL.
    pub assignee_avatar: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Free-form display date.
    pub display_date: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
///
/// Identifier and timestamps are left to column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning identity.
    pub user_id: uuid::Uuid,
    /// Display title.
    pub title: String,
    /// Platform storage string.
    pub platform: String,
    /// Priority tags JSON array.
    pub priority: Value,
    /// Stage storage string.
    pub status: String,
    /// Description.
    pub description: String,
    /// Checklist JSON array.
    pub checklist: Value,
    /// Re-engagement flag.
    pub is_stagnant: bool,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Comment counter.
    pub comments: i32,
    /// Attachment counter.
    pub attachments: i32,
    /// Labels JSON array.
    pub tags: Value,
    /// Assignee avatar URL.
    pub assignee_avatar: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Free-form display date.
    pub display_date: Option<String>,
}

/// Full-record replacement for an existing task.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks, treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Display title.
    pub title: String,
    /// Platform storage string.
    pub platform: String,
    /// Priority tags JSON array.
    pub priority: Value,
    /// Stage storage string.
    pub status: String,
    /// Description.
    pub description: String,
    /// Checklist JSON array.
    pub checklist: Value,
    /// Re-engagement flag.
    pub is_stagnant: bool,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Comment counter.
    pub comments: i32,
    /// Attachment counter.
    pub attachments: i32,
    /// Labels JSON array.
    pub tags: Value,
    /// Assignee avatar URL.
    pub assignee_avatar: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Free-form display date.
    pub display_date: Option<String>,
    /// Update timestamp stamped by the client.
    pub updated_at: DateTime<Utc>,
}
