//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application
//! parameters by the `to_*` methods.

mod execution;
mod output;
mod projects;
mod reasoning;

pub use execution::FileExecutionConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use projects::FileProjectConfig;
pub use reasoning::FileReasoningConfig;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("reasoning.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("reasoning.model cannot be empty")]
    EmptyModelName,

    #[error("projects.{project}.{field} must be at most 100, got {value}")]
    PercentOutOfRange {
        project: String,
        field: &'static str,
        value: u8,
    },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning strategy selection and backend settings
    pub reasoning: FileReasoningConfig,
    /// Executor settings
    pub execution: FileExecutionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Extra project facts, merged over the built-in sample store
    pub projects: BTreeMap<String, FileProjectConfig>,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Timeout of 0 seconds doesn't make sense
        if self.reasoning.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.reasoning.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        for (id, project) in &self.projects {
            project.validate(id)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nion_application::ReasoningMode;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[reasoning]
mode = "rules"
model = "gemini-1.5-pro"
timeout_seconds = 5

[execution]
gate_delivery_on_rejection = true

[output]
format = "json"
color = false

[projects.PRJ-OMEGA]
release_date = "Apr 1, 2026"
code_freeze = "Mar 25, 2026"
days_remaining = 120
progress = 15
capacity = 60
eng_manager = "Ann Lee"
tech_lead = "Bo Ng"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reasoning.mode, ReasoningMode::Rules);
        assert_eq!(config.reasoning.model, "gemini-1.5-pro");
        assert_eq!(config.reasoning.timeout_seconds, 5);
        assert!(config.execution.gate_delivery_on_rejection);
        assert_eq!(config.output.format, FileOutputFormat::Json);
        assert!(!config.output.color);
        assert_eq!(config.projects["PRJ-OMEGA"].eng_manager, "Ann Lee");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[reasoning]
mode = "backend"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reasoning.mode, ReasoningMode::Backend);
        // Defaults should apply
        assert_eq!(config.reasoning.timeout_seconds, 20);
        assert_eq!(config.reasoning.api_key_env, "GOOGLE_API_KEY");
        assert!(!config.execution.gate_delivery_on_rejection);
        assert!(config.output.color);
        assert!(config.projects.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.reasoning.mode, ReasoningMode::Auto);
        assert_eq!(config.output.format, FileOutputFormat::Map);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.reasoning.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = FileConfig::default();
        config.reasoning.model = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }
}
