//! Contentboard: board state and interaction model for a content-planning
//! Kanban.
//!
//! Content ideas move through four pipeline stages (Ideas, Script,
//! Production, Published). This crate owns the task collection, its
//! filtered per-stage projection, the optimistic mutation protocol against a
//! remote record service, drag-and-drop column moves, and focus and editor
//! coordination. Rendering stays with the caller.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task model with no infrastructure dependencies
//! - **Ports**: Trait interfaces for the record service and auth provider
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task model, persistence port, and the optimistic store
//! - [`board`]: Projection, selection, drag, and the board orchestrator
//! - [`auth`]: Identity and session tracking
//! - [`preferences`]: Persisted theme choice
//! - [`config`] and [`logging`]: Process setup

pub mod auth;
pub mod board;
pub mod config;
pub mod logging;
pub mod preferences;
pub mod task;

#[cfg(test)]
mod test_support;
