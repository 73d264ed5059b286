//! Plan templates
//!
//! One template per intent category, expressed as data. Dependencies are
//! zero-based indices into the template's own step list; they are checked
//! when a [`TaskGraph`](super::TaskGraph) is built from the template.

use crate::agent::{AgentName, DomainName, Target};
use crate::reasoning::Intent;

const TRACKING: Target = Target::Domain(DomainName::TrackingExecution);
const COMMUNICATION: Target = Target::Domain(DomainName::CommunicationCollaboration);
const LEARNING: Target = Target::Domain(DomainName::LearningImprovement);
const KNOWLEDGE: Target = Target::Agent(AgentName::KnowledgeRetrieval);
const EVALUATION: Target = Target::Agent(AgentName::Evaluation);

/// One declared step of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateStep {
    pub target: Target,
    pub purpose: &'static str,
    pub depends_on: &'static [usize],
}

const fn step(target: Target, purpose: &'static str, depends_on: &'static [usize]) -> TemplateStep {
    TemplateStep {
        target,
        purpose,
        depends_on,
    }
}

/// A named, ordered list of steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTemplate {
    pub name: &'static str,
    pub steps: &'static [TemplateStep],
}

pub const STATUS: PlanTemplate = PlanTemplate {
    name: "status",
    steps: &[
        step(KNOWLEDGE, "Retrieve project context and current status", &[]),
        step(TRACKING, "Retrieve tracked action items and status", &[]),
        step(COMMUNICATION, "Formulate status response", &[0, 1]),
        step(COMMUNICATION, "Send response to sender", &[2]),
    ],
};

pub const FEASIBILITY: PlanTemplate = PlanTemplate {
    name: "feasibility",
    steps: &[
        step(TRACKING, "Extract action items from request", &[]),
        step(TRACKING, "Extract risks from request", &[]),
        step(TRACKING, "Extract decision needed", &[]),
        step(KNOWLEDGE, "Retrieve project context and timeline", &[]),
        step(COMMUNICATION, "Formulate gap-aware response", &[0, 1, 2, 3]),
        step(EVALUATION, "Evaluate response before sending", &[4]),
        step(COMMUNICATION, "Send response to sender", &[5]),
    ],
};

pub const ESCALATION: PlanTemplate = PlanTemplate {
    name: "escalation",
    steps: &[
        step(TRACKING, "Extract issues from escalation", &[]),
        step(TRACKING, "Extract risks from escalation", &[]),
        step(KNOWLEDGE, "Retrieve escalation context", &[]),
        step(
            COMMUNICATION,
            "Formulate urgent response with action plan",
            &[0, 1, 2],
        ),
        step(COMMUNICATION, "Send urgent response to sender", &[3]),
    ],
};

pub const MEETING: PlanTemplate = PlanTemplate {
    name: "meeting",
    steps: &[
        step(COMMUNICATION, "Process meeting transcript", &[]),
        step(TRACKING, "Extract action items from meeting", &[]),
        step(TRACKING, "Extract issues from meeting", &[]),
        step(TRACKING, "Extract decisions from meeting", &[]),
        step(COMMUNICATION, "Generate meeting summary report", &[0, 1, 2, 3]),
    ],
};

pub const GENERAL: PlanTemplate = PlanTemplate {
    name: "general",
    steps: &[
        step(TRACKING, "Extract action items from message", &[]),
        step(KNOWLEDGE, "Retrieve project context", &[]),
        step(COMMUNICATION, "Formulate acknowledgment response", &[0, 1]),
        step(LEARNING, "Capture standing instructions from message", &[]),
    ],
};

impl PlanTemplate {
    /// Every template, each listed once
    pub const ALL: [PlanTemplate; 5] = [STATUS, FEASIBILITY, ESCALATION, MEETING, GENERAL];

    /// Feasibility and decision requests share a template.
    pub fn for_intent(intent: Intent) -> PlanTemplate {
        match intent {
            Intent::StatusQuery => STATUS,
            Intent::FeasibilityQuery | Intent::DecisionRequest => FEASIBILITY,
            Intent::Escalation => ESCALATION,
            Intent::MeetingUpdate => MEETING,
            Intent::GeneralRequest => GENERAL,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
