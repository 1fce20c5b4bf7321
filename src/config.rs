//! Planner configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! allow_non_open = false
//! step_budget = 100000
//! default_schedule_name = "Generated Schedule"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Name given to schedules produced by the planner.
pub const DEFAULT_SCHEDULE_NAME: &str = "Generated Schedule";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Whether closed, wait-listed, or cancelled sections may be picked.
    pub allow_non_open: bool,
    /// Maximum candidate evaluations per search. `None` = unbounded.
    pub step_budget: Option<usize>,
    /// Name given to generated schedules.
    pub default_schedule_name: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            allow_non_open: false,
            step_budget: None,
            default_schedule_name: DEFAULT_SCHEDULE_NAME.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the non-open policy.
    pub fn with_allow_non_open(mut self, allow: bool) -> Self {
        self.allow_non_open = allow;
        self
    }

    /// Sets the step budget.
    pub fn with_step_budget(mut self, steps: usize) -> Self {
        self.step_budget = Some(steps);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_schedule_name.trim().is_empty() {
            return Err(Error::InvalidConfig {
                field: "default_schedule_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.step_budget == Some(0) {
            return Err(Error::InvalidConfig {
                field: "step_budget".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert!(!config.allow_non_open);
        assert_eq!(config.step_budget, None);
        assert_eq!(config.default_schedule_name, "Generated Schedule");
    }

    #[test]
    fn test_empty_toml_takes_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_from_toml_str() {
        let config = PlannerConfig::from_toml_str(
            r#"
            allow_non_open = true
            step_budget = 5000
            "#,
        )
        .unwrap();
        assert!(config.allow_non_open);
        assert_eq!(config.step_budget, Some(5000));
        assert_eq!(config.default_schedule_name, DEFAULT_SCHEDULE_NAME);
    }

    #[test]
    fn test_invalid_values() {
        let err = PlannerConfig::from_toml_str("default_schedule_name = \"  \"").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "default_schedule_name"));

        let err = PlannerConfig::from_toml_str("step_budget = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "step_budget"));

        let err = PlannerConfig::from_toml_str("allow_non_open = \"yes\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "allow_non_open = true").unwrap();

        let config = PlannerConfig::from_file(file.path()).unwrap();
        assert!(config.allow_non_open);

        let missing = PlannerConfig::from_file("/nonexistent/planner.toml").unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }
}
