//! Agent registry and visibility model
//!
//! The registry is the only way components look agents up. Every lookup
//! names the requester, and the visibility rules decide whether the
//! requester may see the target:
//!
//! | Requester        | May resolve                                          |
//! |------------------|------------------------------------------------------|
//! | L1 planner       | any L2 domain, any cross-cutting agent               |
//! | L2 coordinator   | L3 agents of its own domain, any cross-cutting agent |
//! | L3 agent         | nothing                                              |
//!
//! A violation is a [`VisibilityError`]; resolution never falls through to a
//! different agent.

use super::catalog::{AgentDescriptor, AgentName, DomainName, Layer};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Who is asking to resolve a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requester {
    /// The L1 planner
    Planner,
    /// An L2 coordinator for the given domain
    Coordinator(DomainName),
    /// An L3 agent
    Agent(AgentName),
}

impl Requester {
    pub fn layer(&self) -> Layer {
        match self {
            Requester::Planner => Layer::L1,
            Requester::Coordinator(_) => Layer::L2,
            Requester::Agent(_) => Layer::L3,
        }
    }
}

impl std::fmt::Display for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requester::Planner => write!(f, "L1:planner"),
            Requester::Coordinator(domain) => write!(f, "L2:{}", domain),
            Requester::Agent(agent) => write!(f, "L3:{}", agent),
        }
    }
}

/// A delegation target: an L2 domain or an L3 agent.
///
/// Rendered as `L2:<DOMAIN>` or `L3:<agent>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Target {
    Domain(DomainName),
    Agent(AgentName),
}

impl Target {
    pub fn layer(&self) -> Layer {
        match self {
            Target::Domain(_) => Layer::L2,
            Target::Agent(_) => Layer::L3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Target::Domain(domain) => domain.as_str(),
            Target::Agent(agent) => agent.as_str(),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.layer(), self.name())
    }
}

impl std::str::FromStr for Target {
    type Err = VisibilityError;

    /// Accepts `L2:<DOMAIN>`, `L3:<agent>` or a bare domain/agent name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || VisibilityError::UnknownTarget(s.to_string());
        match s.trim().split_once(':') {
            Some(("L2", name)) => name.parse().map(Target::Domain).map_err(|_| unknown()),
            Some(("L3", name)) => name.parse().map(Target::Agent).map_err(|_| unknown()),
            Some(_) => Err(unknown()),
            None => s
                .parse()
                .map(Target::Domain)
                .or_else(|_| s.parse().map(Target::Agent))
                .map_err(|_| unknown()),
        }
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.to_string()
    }
}

impl TryFrom<String> for Target {
    type Error = VisibilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Successful resolution of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Domain(DomainName),
    Agent(&'a AgentDescriptor),
}

/// A requester tried to reach a target it cannot see
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VisibilityError {
    #[error("Unknown delegation target '{0}'")]
    UnknownTarget(String),

    #[error("{requester} cannot resolve {target}: {rule}")]
    Forbidden {
        requester: String,
        target: String,
        rule: &'static str,
    },
}

/// Read-only catalog of agents with visibility-checked lookup.
///
/// Loaded once at process start and never mutated; see
/// [`AgentRegistry::global`].
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<AgentDescriptor>,
}

static GLOBAL_REGISTRY: LazyLock<AgentRegistry> = LazyLock::new(AgentRegistry::standard);

impl AgentRegistry {
    /// Build a registry from explicit descriptors.
    pub fn from_descriptors(agents: Vec<AgentDescriptor>) -> Self {
        Self { agents }
    }

    /// The standard catalog of eleven agents.
    pub fn standard() -> Self {
        use AgentName::*;
        use DomainName::*;
        Self::from_descriptors(vec![
            AgentDescriptor::in_domain(
                ActionItemExtraction,
                TrackingExecution,
                "Extracts action items with owner and due-date gaps",
            ),
            AgentDescriptor::in_domain(
                RiskExtraction,
                TrackingExecution,
                "Extracts risks with likelihood and impact",
            ),
            AgentDescriptor::in_domain(
                IssueExtraction,
                TrackingExecution,
                "Extracts open issues with severity",
            ),
            AgentDescriptor::in_domain(
                DecisionExtraction,
                TrackingExecution,
                "Extracts pending decisions and their decision makers",
            ),
            AgentDescriptor::in_domain(
                Qna,
                CommunicationCollaboration,
                "Formulates gap-aware answers from upstream results",
            ),
            AgentDescriptor::in_domain(
                ReportGeneration,
                CommunicationCollaboration,
                "Builds summary reports from upstream results",
            ),
            AgentDescriptor::in_domain(
                MessageDelivery,
                CommunicationCollaboration,
                "Delivers the response on the originating channel",
            ),
            AgentDescriptor::in_domain(
                MeetingAttendance,
                CommunicationCollaboration,
                "Processes meeting transcripts into minutes",
            ),
            AgentDescriptor::in_domain(
                InstructionLedLearning,
                LearningImprovement,
                "Captures standing instructions from messages",
            ),
            AgentDescriptor::cross_cutting(
                KnowledgeRetrieval,
                "Looks up project facts in the project store",
            ),
            AgentDescriptor::cross_cutting(
                Evaluation,
                "Scores a response against the delivery rubric",
            ),
        ])
    }

    /// Process-wide registry, initialized on first use.
    pub fn global() -> &'static AgentRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn descriptor(&self, name: AgentName) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn agents(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.iter()
    }

    /// Agents owned by `domain` (cross-cutting agents excluded)
    pub fn agents_in(&self, domain: DomainName) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.iter().filter(move |a| a.domain == Some(domain))
    }

    pub fn cross_cutting(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.agents.iter().filter(|a| a.is_cross_cutting())
    }

    /// Resolve `target` on behalf of `requester`, enforcing visibility.
    pub fn resolve(
        &self,
        requester: Requester,
        target: &Target,
    ) -> Result<Resolution<'_>, VisibilityError> {
        let forbidden = |rule: &'static str| VisibilityError::Forbidden {
            requester: requester.to_string(),
            target: target.to_string(),
            rule,
        };

        match (requester, target) {
            (Requester::Agent(_), _) => Err(forbidden("L3 agents are leaves and resolve nothing")),
            (Requester::Planner, Target::Domain(domain)) => Ok(Resolution::Domain(*domain)),
            (Requester::Coordinator(_), Target::Domain(_)) => Err(forbidden(
                "L2 coordinators cannot delegate to other domains",
            )),
            (_, Target::Agent(name)) => {
                let descriptor = self
                    .descriptor(*name)
                    .ok_or_else(|| VisibilityError::UnknownTarget(target.to_string()))?;
                if descriptor.is_cross_cutting() {
                    return Ok(Resolution::Agent(descriptor));
                }
                match requester {
                    Requester::Coordinator(domain) if descriptor.domain == Some(domain) => {
                        Ok(Resolution::Agent(descriptor))
                    }
                    Requester::Coordinator(_) => {
                        Err(forbidden("L2 coordinators only see agents of their own domain"))
                    }
                    _ => Err(forbidden(
                        "L1 only sees L2 domains and cross-cutting agents",
                    )),
                }
            }
        }
    }
}
