//! Reasoning configuration from TOML (`[reasoning]` section)

use nion_application::{ReasoningMode, ReasoningParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw reasoning configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    /// auto | backend | rules
    pub mode: ReasoningMode,
    /// Backend model name
    pub model: String,
    /// Backend base URL
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Upper bound on each backend call
    pub timeout_seconds: u64,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            mode: ReasoningMode::Auto,
            model: "gemini-2.0-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            timeout_seconds: 20,
        }
    }
}

impl FileReasoningConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn to_params(&self) -> ReasoningParams {
        ReasoningParams {
            mode: self.mode,
            timeout: self.timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params() {
        let config = FileReasoningConfig {
            mode: ReasoningMode::Rules,
            timeout_seconds: 7,
            ..Default::default()
        };
        let params = config.to_params();
        assert_eq!(params.mode, ReasoningMode::Rules);
        assert_eq!(params.timeout, Duration::from_secs(7));
    }
}
