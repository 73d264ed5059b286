//! Port definitions (interfaces for external adapters)

pub mod progress;
pub mod project_store;
pub mod reasoning_backend;
