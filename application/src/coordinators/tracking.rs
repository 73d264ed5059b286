//! TRACKING_EXECUTION coordinator

use super::Coordinator;
use async_trait::async_trait;
use nion_domain::util::contains_phrase;
use nion_domain::{AgentName, DomainName};
use tracing::warn;

const ROUTES: [(&str, AgentName); 4] = [
    ("action item", AgentName::ActionItemExtraction),
    ("risk", AgentName::RiskExtraction),
    ("issue", AgentName::IssueExtraction),
    ("decision", AgentName::DecisionExtraction),
];

/// Fans a tracking task out to every extraction agent its purpose names.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingCoordinator;

#[async_trait]
impl Coordinator for TrackingCoordinator {
    fn domain(&self) -> DomainName {
        DomainName::TrackingExecution
    }

    fn route(&self, purpose: &str) -> Vec<AgentName> {
        let lower = purpose.to_lowercase();
        let agents: Vec<AgentName> = ROUTES
            .iter()
            .filter(|(keyword, _)| contains_phrase(&lower, keyword))
            .map(|(_, agent)| *agent)
            .collect();
        if agents.is_empty() {
            warn!(purpose, "No extraction matches purpose, using action item extraction");
            vec![AgentName::ActionItemExtraction]
        } else {
            agents
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_every_named_extraction() {
        assert_eq!(
            TrackingCoordinator.route("Extract issues and risks from escalation"),
            vec![AgentName::RiskExtraction, AgentName::IssueExtraction]
        );
        assert_eq!(
            TrackingCoordinator.route("Retrieve tracked action items and status"),
            vec![AgentName::ActionItemExtraction]
        );
        assert_eq!(
            TrackingCoordinator.route("Extract decision needed"),
            vec![AgentName::DecisionExtraction]
        );
    }

    #[test]
    fn test_unmatched_purpose_falls_back() {
        assert_eq!(
            TrackingCoordinator.route("Look around"),
            vec![AgentName::ActionItemExtraction]
        );
    }
}
