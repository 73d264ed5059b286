//! COMMUNICATION_COLLABORATION coordinator

use super::Coordinator;
use async_trait::async_trait;
use nion_domain::util::contains_phrase;
use nion_domain::{AgentName, DomainName};
use tracing::warn;

/// First matching rule wins
const ROUTES: [(&[&str], AgentName); 4] = [
    (&["send", "deliver"], AgentName::MessageDelivery),
    (&["response", "answer", "formulate"], AgentName::Qna),
    (&["report", "summary"], AgentName::ReportGeneration),
    (&["meeting", "transcript"], AgentName::MeetingAttendance),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CommunicationCoordinator;

#[async_trait]
impl Coordinator for CommunicationCoordinator {
    fn domain(&self) -> DomainName {
        DomainName::CommunicationCollaboration
    }

    fn route(&self, purpose: &str) -> Vec<AgentName> {
        let lower = purpose.to_lowercase();
        let agent = ROUTES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| contains_phrase(&lower, k)))
            .map(|(_, agent)| *agent);
        match agent {
            Some(agent) => vec![agent],
            None => {
                warn!(purpose, "No communication agent matches purpose, using qna");
                vec![AgentName::Qna]
            }
        }
    }
}
