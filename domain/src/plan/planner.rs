//! L1 planner

use super::graph::{PlanError, TaskGraph};
use super::template::PlanTemplate;
use crate::agent::AgentRegistry;
use crate::message::InputMessage;
use crate::reasoning::ReasoningResult;

/// Turns a classified message into a validated task graph.
///
/// Planning is a pure function of the intent: the template for the intent
/// is instantiated and checked against the registry.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    registry: &'a AgentRegistry,
}

impl<'a> Planner<'a> {
    pub fn new(registry: &'a AgentRegistry) -> Self {
        Self { registry }
    }

    pub fn template_for(&self, reasoning: &ReasoningResult) -> PlanTemplate {
        PlanTemplate::for_intent(reasoning.intent)
    }

    pub fn plan(
        &self,
        _message: &InputMessage,
        reasoning: &ReasoningResult,
    ) -> Result<TaskGraph, PlanError> {
        TaskGraph::from_template(&self.template_for(reasoning), self.registry)
    }
}
