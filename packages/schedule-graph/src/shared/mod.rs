//! Shared module - Common types and utilities
//!
//! Types used by more than one feature. No feature imports another feature's
//! infrastructure; they meet here.

pub mod diagnostics;
pub mod models;

// Re-exports for convenience
pub use diagnostics::{Diagnostic, RelationSite, Severity};
pub use models::*;
