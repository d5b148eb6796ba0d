//! Content tasks and their owner-scoped store.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The optimistic task store in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
