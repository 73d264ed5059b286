//! LEARNING_IMPROVEMENT coordinator

use super::Coordinator;
use async_trait::async_trait;
use nion_domain::{AgentName, DomainName};

#[derive(Debug, Clone, Copy, Default)]
pub struct LearningCoordinator;

#[async_trait]
impl Coordinator for LearningCoordinator {
    fn domain(&self) -> DomainName {
        DomainName::LearningImprovement
    }

    fn route(&self, _purpose: &str) -> Vec<AgentName> {
        vec![AgentName::InstructionLedLearning]
    }
}
