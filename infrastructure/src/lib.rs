//! Infrastructure layer for nion
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Gemini reasoning backend and the in-memory
//! project-fact store. It also loads configuration files.

pub mod config;
pub mod projects;
pub mod reasoning;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileExecutionConfig, FileOutputConfig,
    FileOutputFormat, FileProjectConfig, FileReasoningConfig,
};
pub use projects::StaticProjectStore;
pub use reasoning::{GeminiConfig, GeminiReasoningBackend};
