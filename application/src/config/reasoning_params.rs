//! Reasoning strategy selection parameters

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which reasoning strategy backs a process.
///
/// Chosen once at startup; nothing downstream inspects credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningMode {
    /// Backend when a credential is present, rules otherwise
    #[default]
    Auto,
    /// Always the backend (each failed call falls back to rules)
    Backend,
    /// Rules only, never calls out
    Rules,
}

impl ReasoningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningMode::Auto => "auto",
            ReasoningMode::Backend => "backend",
            ReasoningMode::Rules => "rules",
        }
    }

    /// Whether this mode selects the backend strategy.
    pub fn uses_backend(&self, credential_present: bool) -> bool {
        match self {
            ReasoningMode::Auto => credential_present,
            ReasoningMode::Backend => true,
            ReasoningMode::Rules => false,
        }
    }
}

impl std::fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReasoningMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ReasoningMode::Auto),
            "backend" | "gemini" | "ai" => Ok(ReasoningMode::Backend),
            "rules" | "rule" | "fallback" => Ok(ReasoningMode::Rules),
            other => Err(format!(
                "unknown reasoning mode '{}' (expected auto, backend or rules)",
                other
            )),
        }
    }
}

/// Parameters for building the reasoning strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningParams {
    pub mode: ReasoningMode,
    /// Upper bound on each backend call
    pub timeout: Duration,
}

impl Default for ReasoningParams {
    fn default() -> Self {
        Self {
            mode: ReasoningMode::Auto,
            timeout: Duration::from_secs(20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        assert!(ReasoningMode::Auto.uses_backend(true));
        assert!(!ReasoningMode::Auto.uses_backend(false));
        assert!(ReasoningMode::Backend.uses_backend(false));
        assert!(!ReasoningMode::Rules.uses_backend(true));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Rules".parse::<ReasoningMode>().unwrap(), ReasoningMode::Rules);
        assert_eq!("gemini".parse::<ReasoningMode>().unwrap(), ReasoningMode::Backend);
        assert!("magic".parse::<ReasoningMode>().is_err());
    }
}
