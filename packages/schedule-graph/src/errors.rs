//! Error types for schedule-graph
//!
//! Each layer keeps its own error enum; this one wraps them for callers that
//! drive the whole pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::graph_builder::GraphInvariantError;
use crate::features::schedule_ingest::IngestError;
use crate::features::snapshot::DecodeError;

/// Main error type for schedule-graph operations
#[derive(Debug, Error)]
pub enum ScheduleGraphError {
    /// Schedule descriptor failed structural validation
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Built graph failed verification
    #[error("Invariant violation: {0}")]
    Invariant(#[from] GraphInvariantError),
}

/// Result type alias for schedule-graph operations
pub type Result<T> = std::result::Result<T, ScheduleGraphError>;
