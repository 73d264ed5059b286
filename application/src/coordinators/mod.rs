//! L2 coordinators
//!
//! A coordinator receives a task addressed to its domain, chooses the L3
//! agents that carry it out from the task's purpose, and packages their
//! payloads as sub-results (`TASK-00N-A`, `TASK-00N-B`, ...). Every agent
//! is resolved through the registry as an L2 requester.

pub mod communication;
pub mod learning;
pub mod tracking;

use crate::agents::{AgentError, AgentInput, AgentSet};
use async_trait::async_trait;
use nion_domain::{
    AgentName, AgentRegistry, DomainName, Requester, Resolution, SubResult, Target, Task,
    TaskResult, VisibilityError,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub use communication::CommunicationCoordinator;
pub use learning::LearningCoordinator;
pub use tracking::TrackingCoordinator;

/// Delegation failures that abort a run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DelegationError {
    #[error(transparent)]
    Visibility(#[from] VisibilityError),

    #[error("No implementation registered for agent {0}")]
    MissingAgent(AgentName),

    #[error("No coordinator registered for domain {0}")]
    NoCoordinator(DomainName),
}

#[async_trait]
pub trait Coordinator: Send + Sync {
    fn domain(&self) -> DomainName;

    /// Agents to invoke for `purpose`, in dispatch order. Never empty.
    fn route(&self, purpose: &str) -> Vec<AgentName>;

    /// Run the routed agents and aggregate their payloads.
    ///
    /// Agent failures become failed sub-results; visibility violations and
    /// unregistered agents abort.
    async fn execute(
        &self,
        task: &Task,
        input: &AgentInput<'_>,
        agents: &AgentSet,
        registry: &AgentRegistry,
    ) -> Result<TaskResult, DelegationError> {
        let requester = Requester::Coordinator(self.domain());
        let mut sub_results = Vec::new();

        for (index, name) in self.route(&task.purpose).into_iter().enumerate() {
            let descriptor = match registry.resolve(requester, &Target::Agent(name))? {
                Resolution::Agent(descriptor) => descriptor,
                Resolution::Domain(domain) => {
                    return Err(VisibilityError::UnknownTarget(domain.to_string()).into());
                }
            };
            let sub_id = task.id.sub_id(index);
            debug!(task = %task.id, sub = %sub_id, agent = %name, "Dispatching to agent");

            let sub_result = match agents.invoke(name, input).await {
                Ok(payload) => {
                    SubResult::completed(sub_id, name, descriptor.description, payload)
                }
                Err(AgentError::NotImplemented(name)) => {
                    return Err(DelegationError::MissingAgent(name));
                }
                Err(e) => SubResult::failed(sub_id, name, descriptor.description, e.to_string()),
            };
            sub_results.push(sub_result);
        }

        Ok(TaskResult::delegated(task, sub_results))
    }
}

/// One coordinator per domain
#[derive(Clone)]
pub struct CoordinatorSet {
    coordinators: HashMap<DomainName, Arc<dyn Coordinator>>,
}

impl CoordinatorSet {
    pub fn empty() -> Self {
        Self {
            coordinators: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        Self::empty()
            .with_coordinator(Arc::new(TrackingCoordinator))
            .with_coordinator(Arc::new(CommunicationCoordinator))
            .with_coordinator(Arc::new(LearningCoordinator))
    }

    pub fn with_coordinator(mut self, coordinator: Arc<dyn Coordinator>) -> Self {
        self.coordinators.insert(coordinator.domain(), coordinator);
        self
    }

    pub fn get(&self, domain: DomainName) -> Result<&Arc<dyn Coordinator>, DelegationError> {
        self.coordinators
            .get(&domain)
            .ok_or(DelegationError::NoCoordinator(domain))
    }
}

impl Default for CoordinatorSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CoordinatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut domains: Vec<&str> = self.coordinators.keys().map(DomainName::as_str).collect();
        domains.sort_unstable();
        f.debug_struct("CoordinatorSet")
            .field("domains", &domains)
            .finish()
    }
}
