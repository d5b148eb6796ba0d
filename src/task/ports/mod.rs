//! Port contracts for task persistence.

pub mod repository;

#[cfg(test)]
pub use repository::MockTaskRecords;
pub use repository::{TaskRecordError, TaskRecordResult, TaskRecords};
