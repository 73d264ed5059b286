//! Agent catalog types: layers, domains and agent descriptors.

use serde::{Deserialize, Serialize};

/// Hierarchical tier of the delegation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    /// Plans
    L1,
    /// Coordinates a domain
    L2,
    /// Executes one capability
    L3,
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::L1 => "L1",
            Layer::L2 => "L2",
            Layer::L3 => "L3",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// L2 coordination domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainName {
    TrackingExecution,
    CommunicationCollaboration,
    LearningImprovement,
}

impl DomainName {
    pub const ALL: [DomainName; 3] = [
        DomainName::TrackingExecution,
        DomainName::CommunicationCollaboration,
        DomainName::LearningImprovement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainName::TrackingExecution => "TRACKING_EXECUTION",
            DomainName::CommunicationCollaboration => "COMMUNICATION_COLLABORATION",
            DomainName::LearningImprovement => "LEARNING_IMPROVEMENT",
        }
    }
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DomainName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DomainName::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Every L3 capability known to the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentName {
    ActionItemExtraction,
    RiskExtraction,
    IssueExtraction,
    DecisionExtraction,
    Qna,
    ReportGeneration,
    MessageDelivery,
    MeetingAttendance,
    InstructionLedLearning,
    KnowledgeRetrieval,
    Evaluation,
}

impl AgentName {
    pub const ALL: [AgentName; 11] = [
        AgentName::ActionItemExtraction,
        AgentName::RiskExtraction,
        AgentName::IssueExtraction,
        AgentName::DecisionExtraction,
        AgentName::Qna,
        AgentName::ReportGeneration,
        AgentName::MessageDelivery,
        AgentName::MeetingAttendance,
        AgentName::InstructionLedLearning,
        AgentName::KnowledgeRetrieval,
        AgentName::Evaluation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::ActionItemExtraction => "action_item_extraction",
            AgentName::RiskExtraction => "risk_extraction",
            AgentName::IssueExtraction => "issue_extraction",
            AgentName::DecisionExtraction => "decision_extraction",
            AgentName::Qna => "qna",
            AgentName::ReportGeneration => "report_generation",
            AgentName::MessageDelivery => "message_delivery",
            AgentName::MeetingAttendance => "meeting_attendance",
            AgentName::InstructionLedLearning => "instruction_led_learning",
            AgentName::KnowledgeRetrieval => "knowledge_retrieval",
            AgentName::Evaluation => "evaluation",
        }
    }
}

impl std::fmt::Display for AgentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentName::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim())
            .ok_or_else(|| s.to_string())
    }
}

/// Static description of one agent.
///
/// `name` doubles as the key of the agent's capability: the application
/// layer maps each name to exactly one executable implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDescriptor {
    pub name: AgentName,
    pub layer: Layer,
    /// Owning domain; `None` marks a cross-cutting agent.
    pub domain: Option<DomainName>,
    pub description: &'static str,
}

impl AgentDescriptor {
    pub const fn in_domain(name: AgentName, domain: DomainName, description: &'static str) -> Self {
        Self {
            name,
            layer: Layer::L3,
            domain: Some(domain),
            description,
        }
    }

    pub const fn cross_cutting(name: AgentName, description: &'static str) -> Self {
        Self {
            name,
            layer: Layer::L3,
            domain: None,
            description,
        }
    }

    pub fn is_cross_cutting(&self) -> bool {
        self.domain.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_name_round_trip() {
        for name in AgentName::ALL {
            assert_eq!(name.as_str().parse::<AgentName>().unwrap(), name);
        }
        assert!("summarizer".parse::<AgentName>().is_err());
    }

    #[test]
    fn test_domain_name_parse_case_insensitive() {
        assert_eq!(
            "tracking_execution".parse::<DomainName>().unwrap(),
            DomainName::TrackingExecution
        );
        assert!("SALES".parse::<DomainName>().is_err());
    }

    #[test]
    fn test_descriptor_cross_cutting() {
        let kr = AgentDescriptor::cross_cutting(AgentName::KnowledgeRetrieval, "lookup");
        assert!(kr.is_cross_cutting());
        let qna = AgentDescriptor::in_domain(
            AgentName::Qna,
            DomainName::CommunicationCollaboration,
            "answers",
        );
        assert!(!qna.is_cross_cutting());
        assert_eq!(qna.layer, Layer::L3);
    }
}
