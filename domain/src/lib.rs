//! Domain layer for nion
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns, and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Layers
//!
//! Work is delegated across three tiers:
//!
//! - **L1** plans: the [`Planner`] turns a classified message into a
//!   [`TaskGraph`]
//! - **L2** coordinates a domain (tracking, communication, learning)
//! - **L3** agents execute one capability each
//!
//! ## Visibility
//!
//! Every lookup goes through the [`AgentRegistry`], which enforces which
//! layer may resolve which target. Cross-cutting agents
//! (`knowledge_retrieval`, `evaluation`) are reachable from L1 and L2.
//!
//! ## Checked plans
//!
//! Plan templates are data. A [`TaskGraph`] is only ever produced by a
//! checked construction that rejects cycles, forward references and
//! unreachable targets.

pub mod agent;
pub mod core;
pub mod execution;
pub mod message;
pub mod plan;
pub mod project;
pub mod reasoning;
pub mod tracking;
pub mod util;

// Re-export commonly used types
pub use agent::{
    AgentDescriptor, AgentName, AgentRegistry, DomainName, Layer, Requester, Resolution, Target,
    VisibilityError,
};
pub use core::error::DomainError;
pub use execution::{
    Answer, ContextSnapshot, Criterion, CriterionResult, DeliveryConfirmation, DeliveryStatus,
    EvaluationReport, ExecutionLedger, Payload, Report, ReportSection, SubResult, TaskResult,
    TaskStatus, UnavailableReason, Upstream, Verdict,
};
pub use message::{InputMessage, Sender, SourceChannel};
pub use plan::{PlanError, PlanTemplate, Planner, Task, TaskGraph, TaskId, TemplateStep};
pub use project::ProjectFacts;
pub use reasoning::{
    Intent, ReasoningResult, Signals, SynthesisContext, Urgency, classify_by_rules,
    parse_classification, synthesize_by_rules,
};
pub use tracking::{
    ActionItem, Decision, ExtractionKind, ExtractionList, GapFlag, GapFlags, Issue, Level, Risk,
    Severity, extract,
};
