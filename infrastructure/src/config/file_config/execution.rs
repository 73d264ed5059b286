//! Execution configuration from TOML (`[execution]` section)

use nion_application::ExecutionParams;
use serde::{Deserialize, Serialize};

/// Raw executor configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Skip delivery when the evaluation verdict is REJECTED
    pub gate_delivery_on_rejection: bool,
}

impl FileExecutionConfig {
    pub fn to_params(&self) -> ExecutionParams {
        ExecutionParams::default().with_gate_delivery_on_rejection(self.gate_delivery_on_rejection)
    }
}
