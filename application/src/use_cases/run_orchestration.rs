//! Run Orchestration use case
//!
//! Owns one end-to-end run: validate the message, classify it, plan a task
//! graph and execute it. The reasoning strategy is chosen by the caller
//! once and injected here.

use super::execute_plan::{ExecuteError, TaskExecutor};
use crate::agents::{Agent, AgentSet};
use crate::config::ExecutionParams;
use crate::coordinators::{Coordinator, CoordinatorSet};
use crate::ports::progress::{NoRunProgress, RunProgressNotifier};
use crate::ports::project_store::ProjectFactStore;
use crate::reasoning::ReasoningStrategy;
use nion_domain::{
    AgentRegistry, DomainError, ExecutionLedger, InputMessage, PlanError, Planner,
    ReasoningResult, TaskGraph, TaskStatus,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Invalid message: {0}")]
    InvalidMessage(#[source] DomainError),

    #[error("Planning failed: {0}")]
    Plan(#[from] PlanError),

    #[error("Execution failed: {0}")]
    Execution(#[from] ExecuteError),
}

/// Everything a run produced, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct OrchestrationRun {
    pub message: InputMessage,
    pub reasoning: ReasoningResult,
    pub graph: TaskGraph,
    pub ledger: ExecutionLedger,
    /// Name of the reasoning strategy in use
    pub strategy: String,
    /// Backend calls that fell back to rules during this run
    pub fallbacks: usize,
}

/// Use case for orchestrating a single message
pub struct RunOrchestrationUseCase {
    strategy: Arc<dyn ReasoningStrategy>,
    registry: &'static AgentRegistry,
    agents: AgentSet,
    coordinators: CoordinatorSet,
    params: ExecutionParams,
}

impl RunOrchestrationUseCase {
    pub fn new(strategy: Arc<dyn ReasoningStrategy>, projects: Arc<dyn ProjectFactStore>) -> Self {
        let agents = AgentSet::standard(Arc::clone(&strategy), projects);
        Self {
            strategy,
            registry: AgentRegistry::global(),
            agents,
            coordinators: CoordinatorSet::standard(),
            params: ExecutionParams::default(),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_registry(mut self, registry: &'static AgentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace one agent implementation.
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agents = self.agents.with_agent(agent);
        self
    }

    /// Replace one coordinator.
    pub fn with_coordinator(mut self, coordinator: Arc<dyn Coordinator>) -> Self {
        self.coordinators = self.coordinators.with_coordinator(coordinator);
        self
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, message: InputMessage) -> Result<OrchestrationRun, RunError> {
        self.execute_with_progress(message, &NoRunProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        message: InputMessage,
        progress: &dyn RunProgressNotifier,
    ) -> Result<OrchestrationRun, RunError> {
        message.validate().map_err(RunError::InvalidMessage)?;
        let fallbacks_before = self.strategy.fallback_count();

        info!(
            message = %message.id(),
            source = %message.source(),
            strategy = self.strategy.name(),
            "Starting orchestration"
        );

        let reasoning = self.strategy.classify(&message).await;
        info!(
            intent = %reasoning.intent,
            urgency = %reasoning.urgency,
            source = reasoning.source_label(),
            "Message classified"
        );
        progress.on_reasoning(&reasoning, self.strategy.name());

        let graph = Planner::new(self.registry).plan(&message, &reasoning)?;
        info!(tasks = graph.len(), "Plan ready");
        progress.on_plan_ready(&graph);

        let ledger = TaskExecutor::new(
            self.registry,
            &self.agents,
            &self.coordinators,
            &self.params,
        )
        .run(&graph, &message, &reasoning, progress)
        .await?;

        info!(
            completed = ledger.count(TaskStatus::Completed),
            skipped = ledger.count(TaskStatus::Skipped),
            failed = ledger.count(TaskStatus::Failed),
            "Orchestration finished"
        );

        Ok(OrchestrationRun {
            message,
            reasoning,
            graph,
            ledger,
            strategy: self.strategy.name().to_string(),
            fallbacks: self.strategy.fallback_count().saturating_sub(fallbacks_before),
        })
    }
}
