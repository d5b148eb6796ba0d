//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRecords, TaskPgPool, build_pool};
