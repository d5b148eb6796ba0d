//! Domain model for content tasks.
//!
//! A task is a planned piece of content: it targets one platform, sits in
//! exactly one pipeline stage, and carries a duplicate-free set of priority
//! tags. Infrastructure concerns stay outside of this boundary.

pub mod checklist;
mod due_date;
mod error;
mod ids;
mod platform;
mod priority;
mod stage;
mod task;

pub use checklist::{ChecklistItem, default_checklist};
pub use due_date::DueDate;
pub use error::TaskDomainError;
pub use ids::{OwnerId, TaskId};
pub use platform::{Platform, PlatformFilter};
pub use priority::{PriorityTag, PrioritySet};
pub use stage::Stage;
pub use task::{COPY_MARKER, NEW_IDEA_TITLE, PersistedTaskData, Task, TaskDraft, TaskMetadata};
