//! Execution domain module
//!
//! Typed agent payloads, task results and the per-run execution ledger.

pub mod ledger;
pub mod payload;
pub mod result;
pub mod upstream;

pub use ledger::ExecutionLedger;
pub use payload::{
    Answer, ContextSnapshot, Criterion, CriterionResult, DeliveryConfirmation, DeliveryStatus,
    EvaluationReport, Payload, Report, ReportSection, UnavailableReason, Verdict,
};
pub use result::{SubResult, TaskResult, TaskStatus};
pub use upstream::Upstream;
