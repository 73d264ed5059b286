//! Execute Plan use case
//!
//! Runs a validated [`TaskGraph`] to completion in dependency order.
//!
//! Tasks become eligible once all their dependencies have a result; among
//! eligible tasks the lowest identifier runs first. Execution is strictly
//! sequential, so the ledger needs no synchronization.

use crate::agents::{AgentError, AgentInput, AgentSet};
use crate::config::ExecutionParams;
use crate::coordinators::{CoordinatorSet, DelegationError};
use crate::ports::progress::RunProgressNotifier;
use nion_domain::{
    AgentName, AgentRegistry, DomainError, DomainName, ExecutionLedger, InputMessage, Payload,
    ReasoningResult, Requester, Resolution, Task, TaskGraph, TaskResult, VisibilityError,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("Visibility violation: {0}")]
    Visibility(#[from] VisibilityError),

    #[error("No implementation registered for agent {0}")]
    MissingAgent(AgentName),

    #[error("No coordinator registered for domain {0}")]
    NoCoordinator(DomainName),

    #[error("Ledger rejected a result: {0}")]
    Ledger(#[from] DomainError),
}

impl From<DelegationError> for ExecuteError {
    fn from(e: DelegationError) -> Self {
        match e {
            DelegationError::Visibility(e) => ExecuteError::Visibility(e),
            DelegationError::MissingAgent(name) => ExecuteError::MissingAgent(name),
            DelegationError::NoCoordinator(domain) => ExecuteError::NoCoordinator(domain),
        }
    }
}

/// Dependency-ordered dispatcher for one run
pub struct TaskExecutor<'a> {
    registry: &'a AgentRegistry,
    agents: &'a AgentSet,
    coordinators: &'a CoordinatorSet,
    params: &'a ExecutionParams,
}

impl<'a> TaskExecutor<'a> {
    pub fn new(
        registry: &'a AgentRegistry,
        agents: &'a AgentSet,
        coordinators: &'a CoordinatorSet,
        params: &'a ExecutionParams,
    ) -> Self {
        Self {
            registry,
            agents,
            coordinators,
            params,
        }
    }

    /// Run every task of `graph` and return the filled ledger.
    ///
    /// On success every declared task has exactly one result.
    pub async fn run(
        &self,
        graph: &TaskGraph,
        message: &InputMessage,
        reasoning: &ReasoningResult,
        progress: &dyn RunProgressNotifier,
    ) -> Result<ExecutionLedger, ExecuteError> {
        let mut ledger = ExecutionLedger::for_graph(graph);

        for task in graph.topological_order() {
            progress.on_task_start(task);

            let result = match self.unsatisfied_dependency(task, &ledger) {
                Some(cause) => {
                    info!(task = %task.id, cause = %cause, "Skipping task");
                    TaskResult::skipped(task, cause)
                }
                None => {
                    let input = AgentInput::new(message, reasoning, ledger.upstream_for(task));
                    self.dispatch(task, &input).await?
                }
            };
            debug!(task = %task.id, status = %result.status, "Task finished");

            ledger.record(result)?;
            if let Some(recorded) = ledger.get(task.id) {
                progress.on_task_complete(task, recorded);
            }
        }

        progress.on_run_complete(&ledger);
        Ok(ledger)
    }

    /// Cause for skipping `task`, if any of its dependencies is not usable.
    fn unsatisfied_dependency(&self, task: &Task, ledger: &ExecutionLedger) -> Option<String> {
        task.depends_on.iter().find_map(|dependency| {
            let Some(result) = ledger.get(*dependency) else {
                return Some(format!("dependency {} has no result", dependency));
            };
            if !result.status.is_success() {
                return Some(format!("dependency {} {}", dependency, result.status));
            }
            let rejected = result
                .payloads()
                .any(|p| matches!(p, Payload::Evaluation(report) if report.is_rejected()));
            (self.params.gate_delivery_on_rejection && rejected)
                .then(|| format!("dependency {} rejected by evaluation", dependency))
        })
    }

    async fn dispatch(&self, task: &Task, input: &AgentInput<'_>) -> Result<TaskResult, ExecuteError> {
        match self.registry.resolve(Requester::Planner, &task.target)? {
            Resolution::Domain(domain) => {
                let coordinator = self.coordinators.get(domain)?;
                debug!(task = %task.id, domain = %domain, "Delegating to coordinator");
                Ok(coordinator
                    .execute(task, input, self.agents, self.registry)
                    .await?)
            }
            Resolution::Agent(descriptor) => {
                debug!(task = %task.id, agent = %descriptor.name, "Invoking cross-cutting agent");
                match self.agents.invoke(descriptor.name, input).await {
                    Ok(payload) => Ok(TaskResult::completed(task, payload)),
                    Err(AgentError::NotImplemented(name)) => Err(ExecuteError::MissingAgent(name)),
                    Err(e) => {
                        warn!(task = %task.id, error = %e, "Agent failed");
                        Ok(TaskResult::failed(task, e.to_string()))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support::{FixedProjects, message};
    use crate::agents::{Agent, EvaluationAgent};
    use crate::ports::progress::NoRunProgress;
    use crate::reasoning::RuleBasedReasoning;
    use async_trait::async_trait;
    use nion_domain::{
        AgentDescriptor, Intent, PlanTemplate, TaskId, TaskStatus, Urgency, Verdict,
    };
    use std::sync::{Arc, Mutex};

    fn agents() -> AgentSet {
        AgentSet::standard(
            Arc::new(RuleBasedReasoning::new()),
            Arc::new(FixedProjects::alpha()),
        )
    }

    fn graph(intent: Intent) -> TaskGraph {
        TaskGraph::from_template(&PlanTemplate::for_intent(intent), AgentRegistry::global())
            .unwrap()
    }

    async fn run_with(
        graph: &TaskGraph,
        agents: &AgentSet,
        registry: &AgentRegistry,
        params: &ExecutionParams,
        content: &str,
    ) -> Result<ExecutionLedger, ExecuteError> {
        let coordinators = CoordinatorSet::standard();
        let msg = message(content, Some("PRJ-ALPHA"));
        let reasoning = ReasoningResult::new(Intent::FeasibilityQuery, Urgency::Medium);
        TaskExecutor::new(registry, agents, &coordinators, params)
            .run(graph, &msg, &reasoning, &NoRunProgress)
            .await
    }

    /// Always rejects
    struct Harsh;

    #[async_trait]
    impl Agent for Harsh {
        fn name(&self) -> AgentName {
            AgentName::Evaluation
        }

        async fn execute(&self, _input: &AgentInput<'_>) -> Result<Payload, AgentError> {
            Ok(Payload::Evaluation(EvaluationAgent::new().evaluate(None)))
        }
    }

    /// Fails on every call
    struct Unreachable;

    #[async_trait]
    impl Agent for Unreachable {
        fn name(&self) -> AgentName {
            AgentName::KnowledgeRetrieval
        }

        async fn execute(&self, _input: &AgentInput<'_>) -> Result<Payload, AgentError> {
            Err(AgentError::MissingInput {
                agent: AgentName::KnowledgeRetrieval,
                reason: "store offline".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<TaskId>>);

    impl RunProgressNotifier for Recorder {
        fn on_task_complete(&self, task: &Task, _result: &TaskResult) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(task.id);
            }
        }
    }

    #[tokio::test]
    async fn test_every_task_reaches_terminal_state() {
        for intent in [
            Intent::StatusQuery,
            Intent::FeasibilityQuery,
            Intent::Escalation,
            Intent::MeetingUpdate,
            Intent::GeneralRequest,
        ] {
            let graph = graph(intent);
            let ledger = run_with(
                &graph,
                &agents(),
                AgentRegistry::global(),
                &ExecutionParams::default(),
                "David: can we fix the login bug by Friday?",
            )
            .await
            .unwrap();
            assert!(ledger.is_complete(), "{:?}", intent);
            assert_eq!(ledger.count(TaskStatus::Completed), graph.len(), "{:?}", intent);
        }
    }

    #[tokio::test]
    async fn test_execution_follows_dependencies() {
        let graph = graph(Intent::FeasibilityQuery);
        let recorder = Recorder::default();
        let coordinators = CoordinatorSet::standard();
        let msg = message("Can we add SSO?", Some("PRJ-ALPHA"));
        let reasoning = ReasoningResult::new(Intent::FeasibilityQuery, Urgency::Medium);
        let agents = agents();
        let params = ExecutionParams::default();
        TaskExecutor::new(AgentRegistry::global(), &agents, &coordinators, &params)
            .run(&graph, &msg, &reasoning, &recorder)
            .await
            .unwrap();

        let seen = recorder.0.lock().unwrap().clone();
        let expected: Vec<TaskId> = (1..=7).map(TaskId::new).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_failed_dependency_skips_dependents() {
        let graph = graph(Intent::StatusQuery);
        let agents = agents().with_agent(Arc::new(Unreachable));
        let ledger = run_with(
            &graph,
            &agents,
            AgentRegistry::global(),
            &ExecutionParams::default(),
            "What's the status?",
        )
        .await
        .unwrap();

        assert_eq!(ledger.status_of(TaskId::new(1)), Some(TaskStatus::Failed));
        assert_eq!(ledger.status_of(TaskId::new(2)), Some(TaskStatus::Completed));
        let respond = ledger.get(TaskId::new(3)).unwrap();
        assert_eq!(respond.status, TaskStatus::Skipped);
        assert_eq!(respond.cause.as_deref(), Some("dependency TASK-001 failed"));
        let send = ledger.get(TaskId::new(4)).unwrap();
        assert_eq!(send.cause.as_deref(), Some("dependency TASK-003 skipped"));
        assert!(ledger.is_complete());
    }

    #[tokio::test]
    async fn test_rejection_is_advisory_by_default() {
        let graph = graph(Intent::FeasibilityQuery);
        let agents = agents().with_agent(Arc::new(Harsh));
        let ledger = run_with(
            &graph,
            &agents,
            AgentRegistry::global(),
            &ExecutionParams::default(),
            "Can we add SSO?",
        )
        .await
        .unwrap();

        let evaluation = ledger.get(TaskId::new(6)).unwrap();
        assert!(matches!(
            &evaluation.payload,
            Some(Payload::Evaluation(report)) if report.verdict == Verdict::Rejected
        ));
        assert_eq!(ledger.status_of(TaskId::new(7)), Some(TaskStatus::Completed));
    }

    #[tokio::test]
    async fn test_rejection_gates_delivery_when_enabled() {
        let graph = graph(Intent::FeasibilityQuery);
        let agents = agents().with_agent(Arc::new(Harsh));
        let params = ExecutionParams::default().with_gate_delivery_on_rejection(true);
        let ledger = run_with(
            &graph,
            &agents,
            AgentRegistry::global(),
            &params,
            "Can we add SSO?",
        )
        .await
        .unwrap();

        let send = ledger.get(TaskId::new(7)).unwrap();
        assert_eq!(send.status, TaskStatus::Skipped);
        assert_eq!(
            send.cause.as_deref(),
            Some("dependency TASK-006 rejected by evaluation")
        );
    }

    #[tokio::test]
    async fn test_unresolvable_target_aborts() {
        let graph = graph(Intent::StatusQuery);
        let narrow = AgentRegistry::from_descriptors(vec![AgentDescriptor::cross_cutting(
            AgentName::Evaluation,
            "Scores a response",
        )]);
        let err = run_with(
            &graph,
            &agents(),
            &narrow,
            &ExecutionParams::default(),
            "What's the status?",
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            ExecuteError::Visibility(VisibilityError::UnknownTarget(
                "L3:knowledge_retrieval".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_missing_coordinator_aborts() {
        let graph = graph(Intent::StatusQuery);
        let coordinators = CoordinatorSet::empty();
        let msg = message("What's the status?", None);
        let reasoning = ReasoningResult::new(Intent::StatusQuery, Urgency::Medium);
        let agents = agents();
        let params = ExecutionParams::default();
        let err = TaskExecutor::new(AgentRegistry::global(), &agents, &coordinators, &params)
            .run(&graph, &msg, &reasoning, &NoRunProgress)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ExecuteError::NoCoordinator(DomainName::TrackingExecution)
        );
    }
}
