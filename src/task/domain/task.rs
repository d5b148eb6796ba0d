//! Task aggregate, creation templates, and pass-through metadata.

use super::{
    ChecklistItem, DueDate, Platform, PriorityTag, PrioritySet, Stage, TaskDomainError, TaskId,
    checklist,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Title given to tasks created from the "new idea" affordance.
pub const NEW_IDEA_TITLE: &str = "New Idea";

/// Marker appended to the title of a duplicated task.
pub const COPY_MARKER: &str = " (Copy)";

/// Display-only metadata carried with a task but never interpreted by the
/// board logic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// Number of comments.
    pub comments: u32,
    /// Number of attachments.
    pub attachments: u32,
    /// Free-form labels.
    pub tags: Vec<String>,
    /// Avatar URL of the assignee.
    pub assignee_avatar: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Free-form display date.
    pub date: Option<String>,
}

/// Template for a task that has not been persisted yet.
///
/// The persistence layer assigns the identifier and timestamps on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Display title.
    pub title: String,
    /// Target platform.
    pub platform: Platform,
    /// Priority tags.
    pub priority: PrioritySet,
    /// Pipeline stage.
    pub status: Stage,
    /// Free-text description.
    pub description: String,
    /// Quality checklist.
    pub checklist: Vec<ChecklistItem>,
    /// Optional due date.
    pub due_date: Option<DueDate>,
    /// Whether the task needs re-engagement.
    pub is_stagnant: bool,
    /// Display-only metadata.
    #[serde(flatten)]
    pub metadata: TaskMetadata,
}

impl TaskDraft {
    /// Returns the template used by the "new idea" affordance.
    #[must_use]
    pub fn new_idea() -> Self {
        Self {
            title: NEW_IDEA_TITLE.to_owned(),
            platform: Platform::YouTube,
            priority: [PriorityTag::Draft].into_iter().collect(),
            status: Stage::Ideas,
            description: String::new(),
            checklist: checklist::default_checklist(),
            due_date: None,
            is_stagnant: false,
            metadata: TaskMetadata::default(),
        }
    }

    /// Builds the template for a copy of `source`.
    ///
    /// Interaction counters are zeroed, the stagnant flag is cleared, the
    /// due date is dropped, and the title gains [`COPY_MARKER`].
    #[must_use]
    pub fn duplicate_of(source: &Task) -> Self {
        Self {
            title: format!("{}{COPY_MARKER}", source.title()),
            platform: source.platform(),
            priority: source.priority().clone(),
            status: source.status(),
            description: source.description().to_owned(),
            checklist: source.checklist().to_vec(),
            due_date: None,
            is_stagnant: false,
            metadata: TaskMetadata {
                comments: 0,
                attachments: 0,
                ..source.metadata().clone()
            },
        }
    }

    /// Validates the draft before it is sent for insertion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(())
    }
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new_idea()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    platform: Platform,
    priority: PrioritySet,
    status: Stage,
    description: String,
    checklist: Vec<ChecklistItem>,
    due_date: Option<DueDate>,
    is_stagnant: bool,
    #[serde(flatten)]
    metadata: TaskMetadata,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted field values.
    pub fields: TaskDraft,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let PersistedTaskData {
            id,
            fields,
            created_at,
            updated_at,
        } = data;
        Self {
            id,
            title: fields.title,
            platform: fields.platform,
            priority: fields.priority,
            status: fields.status,
            description: fields.description,
            checklist: fields.checklist,
            due_date: fields.due_date,
            is_stagnant: fields.is_stagnant,
            metadata: fields.metadata,
            created_at,
            updated_at,
        }
    }

    /// Returns the field values as a draft, dropping identity and
    /// timestamps.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            platform: self.platform,
            priority: self.priority.clone(),
            status: self.status,
            description: self.description.clone(),
            checklist: self.checklist.clone(),
            due_date: self.due_date,
            is_stagnant: self.is_stagnant,
            metadata: self.metadata.clone(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the target platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the priority tags.
    #[must_use]
    pub const fn priority(&self) -> &PrioritySet {
        &self.priority
    }

    /// Returns the pipeline stage.
    #[must_use]
    pub const fn status(&self) -> Stage {
        self.status
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the checklist.
    #[must_use]
    pub fn checklist(&self) -> &[ChecklistItem] {
        &self.checklist
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns `true` when the task is flagged for re-engagement.
    #[must_use]
    pub const fn is_stagnant(&self) -> bool {
        self.is_stagnant
    }

    /// Returns the display-only metadata.
    #[must_use]
    pub const fn metadata(&self) -> &TaskMetadata {
        &self.metadata
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    ///
    /// Blank input keeps the previous title; returns `true` when the title
    /// changed.
    pub fn retitle(&mut self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == self.title {
            return false;
        }
        trimmed.clone_into(&mut self.title);
        true
    }

    /// Switches platform without touching the priority tags.
    pub const fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    /// Adds the tag if absent, removes it if present.
    pub fn toggle_priority(&mut self, tag: PriorityTag) -> bool {
        self.priority.toggle(tag)
    }

    /// Removes every priority tag.
    pub fn clear_priority(&mut self) {
        self.priority.clear();
    }

    /// Moves the task to another stage.
    pub const fn set_status(&mut self, status: Stage) {
        self.status = status;
    }

    /// Returns a copy of the task placed in `status`.
    #[must_use]
    pub fn with_status(&self, status: Stage) -> Self {
        let mut moved = self.clone();
        moved.status = status;
        moved
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Flips a checklist item; returns `false` when `item_id` is unknown.
    pub fn toggle_checklist_item(&mut self, item_id: &str) -> bool {
        checklist::toggle_item(&mut self.checklist, item_id)
    }

    /// Sets or clears the due date.
    pub const fn set_due_date(&mut self, due_date: Option<DueDate>) {
        self.due_date = due_date;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
