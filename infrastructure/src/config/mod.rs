//! Configuration file loading for nion
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `NION_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./nion.toml` or `./.nion.toml`
//! 4. Global: `$XDG_CONFIG_HOME/nion/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileExecutionConfig, FileOutputConfig, FileOutputFormat,
    FileProjectConfig, FileReasoningConfig,
};
pub use loader::ConfigLoader;
