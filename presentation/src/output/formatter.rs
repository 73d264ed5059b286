//! Output formatter trait

use nion_application::OrchestrationRun;

/// Trait for formatting orchestration runs
pub trait OutputFormatter {
    /// Format the complete orchestration map
    fn format(&self, run: &OrchestrationRun) -> String;

    /// Format as JSON
    fn format_json(&self, run: &OrchestrationRun) -> String;
}
