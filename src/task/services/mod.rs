//! Application services for the owner-scoped task collection.

mod store;

pub use store::{LoadOutcome, MutationOutcome, PendingMutation, TaskStore};
