//! Build configuration
//!
//! # Examples
//!
//! ```rust,ignore
//! use schedule_graph::config::{BuildConfig, ScheduleFilter};
//!
//! // Defaults: only the `Update` schedule, `::` separated names
//! let config = BuildConfig::default();
//!
//! // Builder overrides
//! let config = BuildConfig::default().with_schedules(ScheduleFilter::All);
//!
//! // YAML file
//! let config = BuildConfig::from_yaml_file("inspector.yaml")?;
//! ```

pub mod build_config;
pub mod error;

// Re-exports
pub use build_config::{
    BuildConfig, ScheduleFilter, DEFAULT_LABEL_SEPARATOR, DEFAULT_SCHEDULE, DEFAULT_SET_ID_PREFIX,
    DEFAULT_UNKNOWN_LABEL,
};
pub use error::{ConfigError, ConfigResult};
