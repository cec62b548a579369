//! Graph build configuration
//!
//! Every field has a default matching the inspected application's conventions,
//! so an empty YAML document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use crate::features::graph_builder::domain::ScheduleSelector;

/// Schedule name shown when no selection is configured
pub const DEFAULT_SCHEDULE: &str = "Update";

/// Separator between namespace segments of a qualified name
pub const DEFAULT_LABEL_SEPARATOR: &str = "::";

/// Label used when a node's qualified name cannot be found
pub const DEFAULT_UNKNOWN_LABEL: &str = "<unknown>";

/// Prefix the source format puts on set ids (`Set(3)` vs `System(3)`)
pub const DEFAULT_SET_ID_PREFIX: &str = "Set";

/// Which schedules take part in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "names", rename_all = "snake_case")]
pub enum ScheduleFilter {
    /// Every schedule
    All,
    /// Only schedules whose name is listed
    Only(Vec<String>),
    /// Every schedule except the listed ones
    Except(Vec<String>),
}

impl ScheduleFilter {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn except<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Except(names.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            ScheduleFilter::All => true,
            ScheduleFilter::Only(names) => names.iter().any(|n| n == name),
            ScheduleFilter::Except(names) => !names.iter().any(|n| n == name),
        }
    }
}

impl Default for ScheduleFilter {
    fn default() -> Self {
        Self::Only(vec![DEFAULT_SCHEDULE.to_string()])
    }
}

impl ScheduleSelector for ScheduleFilter {
    fn select(&self, name: &str) -> bool {
        self.matches(name)
    }
}

/// Options for [`GraphBuilder`](crate::features::graph_builder::GraphBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Schedule selection used by the configured build entry points
    pub schedules: ScheduleFilter,

    /// Namespace separator; the label is the last segment
    pub label_separator: String,

    /// Label for nodes without a resolvable name
    pub unknown_label: String,

    /// Ids starting with this prefix are sets when the name tables don't say
    pub set_id_prefix: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            schedules: ScheduleFilter::default(),
            label_separator: DEFAULT_LABEL_SEPARATOR.to_string(),
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
            set_id_prefix: DEFAULT_SET_ID_PREFIX.to_string(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedules(mut self, schedules: ScheduleFilter) -> Self {
        self.schedules = schedules;
        self
    }

    pub fn with_label_separator(mut self, separator: impl Into<String>) -> Self {
        self.label_separator = separator.into();
        self
    }

    pub fn with_unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    pub fn with_set_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_id_prefix = prefix.into();
        self
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: BuildConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.label_separator.is_empty() {
            return Err(ConfigError::invalid_field(
                "label_separator",
                "must not be empty",
            ));
        }
        if self.unknown_label.trim().is_empty() {
            return Err(ConfigError::invalid_field(
                "unknown_label",
                "must contain visible characters",
            ));
        }
        if self.set_id_prefix.is_empty() {
            return Err(ConfigError::invalid_field(
                "set_id_prefix",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
