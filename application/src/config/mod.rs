//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ExecutionParams`] - executor control (delivery gating)
//! - [`ReasoningParams`] - reasoning strategy selection and backend timeout

pub mod execution_params;
pub mod reasoning_params;

pub use execution_params::ExecutionParams;
pub use reasoning_params::{ReasoningMode, ReasoningParams};
