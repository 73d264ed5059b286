//! Application layer for nion
//!
//! This crate contains the reasoning strategies, L3 agents, L2 coordinators,
//! the executor and the orchestration use case, plus the ports adapters
//! implement. It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod coordinators;
pub mod ports;
pub mod reasoning;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{Agent, AgentError, AgentInput, AgentSet};
pub use config::{ExecutionParams, ReasoningMode, ReasoningParams};
pub use coordinators::{Coordinator, CoordinatorSet, DelegationError};
pub use ports::{
    progress::{NoRunProgress, RunProgressNotifier},
    project_store::ProjectFactStore,
    reasoning_backend::{BackendError, ReasoningBackend},
};
pub use reasoning::{BackendReasoning, ReasoningStrategy, RuleBasedReasoning, Synthesis};
pub use use_cases::execute_plan::{ExecuteError, TaskExecutor};
pub use use_cases::run_orchestration::{OrchestrationRun, RunError, RunOrchestrationUseCase};
