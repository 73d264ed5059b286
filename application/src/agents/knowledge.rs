//! Knowledge retrieval (cross-cutting)

use super::{Agent, AgentError, AgentInput};
use crate::ports::project_store::ProjectFactStore;
use async_trait::async_trait;
use nion_domain::{AgentName, ContextSnapshot, Payload, UnavailableReason};
use std::sync::Arc;
use tracing::debug;

/// Looks the message's project up in the project-fact store.
///
/// An absent or unknown project is an `Unavailable` snapshot, never a
/// failure.
pub struct KnowledgeRetrievalAgent {
    projects: Arc<dyn ProjectFactStore>,
}

impl KnowledgeRetrievalAgent {
    pub fn new(projects: Arc<dyn ProjectFactStore>) -> Self {
        Self { projects }
    }

    pub fn snapshot(&self, project: Option<&str>) -> ContextSnapshot {
        let Some(project) = project else {
            return ContextSnapshot::Unavailable {
                reason: UnavailableReason::NoProject,
            };
        };
        match self.projects.lookup(project) {
            Some(facts) => ContextSnapshot::Available {
                project: project.to_string(),
                facts,
            },
            None => {
                debug!(project, "Project not found in store");
                ContextSnapshot::Unavailable {
                    reason: UnavailableReason::UnknownProject(project.to_string()),
                }
            }
        }
    }
}

#[async_trait]
impl Agent for KnowledgeRetrievalAgent {
    fn name(&self) -> AgentName {
        AgentName::KnowledgeRetrieval
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        Ok(Payload::Context(self.snapshot(input.message.project())))
    }
}
