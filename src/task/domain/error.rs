//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or parsing task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The platform value is not one of the supported publishing platforms.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// The stage value is not one of the pipeline stages.
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// The priority tag is not part of the tag vocabulary.
    #[error("unknown priority tag: {0}")]
    UnknownPriority(String),

    /// The due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
}
