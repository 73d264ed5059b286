//! Message delivery agent

use super::{Agent, AgentError, AgentInput};
use crate::ports::project_store::ProjectFactStore;
use async_trait::async_trait;
use nion_domain::{AgentName, DeliveryConfirmation, DeliveryStatus, Payload, Urgency};
use std::sync::Arc;

const ACKNOWLEDGMENT: &str = "Message acknowledged and processed.";

/// Addresses the upstream answer to the sender on the originating channel.
///
/// High-urgency messages copy the project's engineering manager when the
/// project is known.
pub struct MessageDeliveryAgent {
    projects: Arc<dyn ProjectFactStore>,
}

impl MessageDeliveryAgent {
    pub fn new(projects: Arc<dyn ProjectFactStore>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl Agent for MessageDeliveryAgent {
    fn name(&self) -> AgentName {
        AgentName::MessageDelivery
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        let message = input.message;
        let body = input
            .upstream
            .answer()
            .map(|answer| answer.to_text())
            .unwrap_or_else(|| ACKNOWLEDGMENT.to_string());

        let cc = if input.reasoning.urgency == Urgency::High {
            message
                .project()
                .and_then(|project| self.projects.lookup(project))
                .map(|facts| facts.engineering_manager)
                .filter(|manager| *manager != message.sender().name)
                .into_iter()
                .collect()
        } else {
            Vec::new()
        };

        Ok(Payload::Delivery(DeliveryConfirmation {
            channel: message.source().to_string(),
            recipient: message.sender().name.clone(),
            cc,
            status: DeliveryStatus::Sent,
            body,
        }))
    }
}
