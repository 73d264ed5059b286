//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// How a run is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// Human-readable orchestration map
    #[default]
    Map,
    /// The whole run as JSON
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: FileOutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: FileOutputFormat::Map,
            color: true,
        }
    }
}
