//! Progress notification port
//!
//! Defines the interface for reporting progress during an orchestration run.

use nion_domain::{ExecutionLedger, ReasoningResult, Task, TaskGraph, TaskResult};

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain log lines, etc.)
pub trait RunProgressNotifier: Send + Sync {
    /// Called once the message has been classified
    fn on_reasoning(&self, _reasoning: &ReasoningResult, _strategy: &str) {}

    /// Called when the task graph has been built and validated
    fn on_plan_ready(&self, _graph: &TaskGraph) {}

    /// Called before a task is dispatched
    fn on_task_start(&self, _task: &Task) {}

    /// Called after a task's result has been recorded
    fn on_task_complete(&self, _task: &Task, _result: &TaskResult) {}

    /// Called when every task has reached a terminal state
    fn on_run_complete(&self, _ledger: &ExecutionLedger) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoRunProgress;

impl RunProgressNotifier for NoRunProgress {}
