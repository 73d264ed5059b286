//! Extraction agents (action items, risks, issues, decisions)

use super::{Agent, AgentError, AgentInput};
use async_trait::async_trait;
use nion_domain::{AgentName, ExtractionKind, Payload, extract};

/// Runs the extraction heuristics for one item kind over the message text.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionAgent {
    kind: ExtractionKind,
}

impl ExtractionAgent {
    pub fn new(kind: ExtractionKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ExtractionKind {
        self.kind
    }
}

#[async_trait]
impl Agent for ExtractionAgent {
    fn name(&self) -> AgentName {
        match self.kind {
            ExtractionKind::ActionItems => AgentName::ActionItemExtraction,
            ExtractionKind::Risks => AgentName::RiskExtraction,
            ExtractionKind::Issues => AgentName::IssueExtraction,
            ExtractionKind::Decisions => AgentName::DecisionExtraction,
        }
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        Ok(Payload::Extraction(extract(
            self.kind,
            input.message.content(),
        )))
    }
}
