//! Execution parameters - executor behavior control.
//!
//! [`ExecutionParams`] groups the static parameters that control the
//! executor in [`TaskExecutor`](crate::use_cases::execute_plan::TaskExecutor).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Executor control parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Treat a REJECTED evaluation as an unsatisfied dependency, so tasks
    /// depending on it (delivery) are skipped. Off by default: the verdict
    /// is advisory and only surfaced in the report.
    pub gate_delivery_on_rejection: bool,
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_gate_delivery_on_rejection(mut self, gate: bool) -> Self {
        self.gate_delivery_on_rejection = gate;
        self
    }
}
