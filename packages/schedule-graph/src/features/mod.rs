//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains, where it needs them:
//! - domain/     - Pure models and traits
//! - application/ - Use cases
//! - infrastructure/ - Implementations

pub mod graph_builder;
pub mod graph_store;
pub mod layout;
pub mod schedule_ingest;
pub mod snapshot;
