//! L3 agents
//!
//! Each agent implements one capability as a function of the message and
//! the upstream results handed to it. Agents know nothing about the task
//! graph and resolve nothing themselves.

pub mod delivery;
pub mod evaluation;
pub mod extraction;
pub mod knowledge;
pub mod learning;
pub mod meeting;
pub mod qna;
pub mod report;

use crate::ports::project_store::ProjectFactStore;
use crate::reasoning::ReasoningStrategy;
use async_trait::async_trait;
use nion_domain::{AgentName, ExtractionKind, InputMessage, Payload, ReasoningResult, Upstream};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub use delivery::MessageDeliveryAgent;
pub use evaluation::EvaluationAgent;
pub use extraction::ExtractionAgent;
pub use knowledge::KnowledgeRetrievalAgent;
pub use learning::InstructionLearningAgent;
pub use meeting::MeetingAttendanceAgent;
pub use qna::QnaAgent;
pub use report::ReportGenerationAgent;

/// Errors an agent can report for one invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Agent {agent} cannot run: {reason}")]
    MissingInput { agent: AgentName, reason: String },

    #[error("No implementation registered for agent {0}")]
    NotImplemented(AgentName),
}

/// Everything an agent may read
#[derive(Debug, Clone)]
pub struct AgentInput<'a> {
    pub message: &'a InputMessage,
    pub reasoning: &'a ReasoningResult,
    /// Results of the tasks the current task depends on
    pub upstream: Upstream<'a>,
}

impl<'a> AgentInput<'a> {
    pub fn new(
        message: &'a InputMessage,
        reasoning: &'a ReasoningResult,
        upstream: Upstream<'a>,
    ) -> Self {
        Self {
            message,
            reasoning,
            upstream,
        }
    }
}

/// A single L3 capability
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> AgentName;

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError>;
}

/// Executable implementations keyed by agent name
#[derive(Clone, Default)]
pub struct AgentSet {
    agents: HashMap<AgentName, Arc<dyn Agent>>,
}

impl AgentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One implementation for every agent in the standard catalog.
    pub fn standard(
        strategy: Arc<dyn ReasoningStrategy>,
        projects: Arc<dyn ProjectFactStore>,
    ) -> Self {
        let mut set = Self::new();
        for kind in ExtractionKind::ALL {
            set = set.with_agent(Arc::new(ExtractionAgent::new(kind)));
        }
        set.with_agent(Arc::new(KnowledgeRetrievalAgent::new(Arc::clone(&projects))))
            .with_agent(Arc::new(QnaAgent::new(strategy)))
            .with_agent(Arc::new(EvaluationAgent::new()))
            .with_agent(Arc::new(MessageDeliveryAgent::new(projects)))
            .with_agent(Arc::new(ReportGenerationAgent::new()))
            .with_agent(Arc::new(MeetingAttendanceAgent::new()))
            .with_agent(Arc::new(InstructionLearningAgent::new()))
    }

    /// Register `agent`, replacing any implementation with the same name.
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agents.insert(agent.name(), agent);
        self
    }

    pub fn get(&self, name: AgentName) -> Option<&Arc<dyn Agent>> {
        self.agents.get(&name)
    }

    pub fn contains(&self, name: AgentName) -> bool {
        self.agents.contains_key(&name)
    }

    pub async fn invoke(
        &self,
        name: AgentName,
        input: &AgentInput<'_>,
    ) -> Result<Payload, AgentError> {
        let agent = self.get(name).ok_or(AgentError::NotImplemented(name))?;
        agent.execute(input).await
    }
}

impl std::fmt::Debug for AgentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.agents.keys().map(AgentName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AgentSet").field("agents", &names).finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FixedProjects, message};
    use super::*;
    use crate::reasoning::RuleBasedReasoning;
    use nion_domain::{AgentRegistry, Intent, Urgency};

    #[test]
    fn test_standard_set_covers_catalog() {
        let set = AgentSet::standard(
            Arc::new(RuleBasedReasoning::new()),
            Arc::new(FixedProjects::alpha()),
        );
        for descriptor in AgentRegistry::standard().agents() {
            assert!(set.contains(descriptor.name), "{}", descriptor.name);
        }
    }

    #[tokio::test]
    async fn test_invoke_missing_agent() {
        let set = AgentSet::new();
        let msg = message("hello", None);
        let reasoning = ReasoningResult::new(Intent::GeneralRequest, Urgency::Low);
        let input = AgentInput::new(&msg, &reasoning, Upstream::empty());
        assert_eq!(
            set.invoke(AgentName::Qna, &input).await,
            Err(AgentError::NotImplemented(AgentName::Qna))
        );
    }
}
