//! Typed payloads produced by agents

use crate::project::ProjectFacts;
use crate::tracking::ExtractionList;
use serde::Serialize;

/// Everything an agent can hand back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Payload {
    Extraction(ExtractionList),
    Context(ContextSnapshot),
    Response(Answer),
    Evaluation(EvaluationReport),
    Delivery(DeliveryConfirmation),
    Report(Report),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Extraction(_) => "extraction",
            Payload::Context(_) => "context",
            Payload::Response(_) => "response",
            Payload::Evaluation(_) => "evaluation",
            Payload::Delivery(_) => "delivery",
            Payload::Report(_) => "report",
        }
    }
}

/// Why no project context could be retrieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "project", rename_all = "snake_case")]
pub enum UnavailableReason {
    NoProject,
    UnknownProject(String),
}

/// Result of a project-fact lookup.
///
/// A miss is not an error: it is the `Unavailable` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContextSnapshot {
    Available { project: String, facts: ProjectFacts },
    Unavailable { reason: UnavailableReason },
}

impl ContextSnapshot {
    pub fn is_available(&self) -> bool {
        matches!(self, ContextSnapshot::Available { .. })
    }

    pub fn facts(&self) -> Option<&ProjectFacts> {
        match self {
            ContextSnapshot::Available { facts, .. } => Some(facts),
            ContextSnapshot::Unavailable { .. } => None,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            ContextSnapshot::Available { project, facts } => facts.fact_lines(project),
            ContextSnapshot::Unavailable { reason } => {
                let detail = match reason {
                    UnavailableReason::NoProject => {
                        "No project identifier was supplied".to_string()
                    }
                    UnavailableReason::UnknownProject(id) => {
                        format!("Project {} is not in the project store", id)
                    }
                };
                vec!["No project context available".to_string(), detail]
            }
        }
    }
}

/// Fixed-shape, gap-aware answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// What is known about the project
    pub known: Vec<String>,
    /// What has been logged during this run
    pub logged: Vec<String>,
    /// What is still needed
    pub needed: Vec<String>,
    pub narrative: String,
    pub narrative_from_backend: bool,
    pub context_available: bool,
}

impl Answer {
    pub const NO_CONTEXT: &'static str = "Limited project context available";

    pub fn to_text(&self) -> String {
        let section = |title: &str, lines: &[String]| {
            let mut out = format!("{}:", title);
            if lines.is_empty() {
                out.push_str("\n  • (nothing yet)");
            }
            for line in lines {
                out.push_str("\n  • ");
                out.push_str(line);
            }
            out
        };
        let mut text = [
            section("WHAT I KNOW", &self.known),
            section("WHAT I'VE LOGGED", &self.logged),
            section("WHAT I NEED", &self.needed),
        ]
        .join("\n\n");
        if !self.narrative.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.narrative);
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Relevance,
    Accuracy,
    Tone,
    GapsAcknowledged,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Relevance,
        Criterion::Accuracy,
        Criterion::Tone,
        Criterion::GapsAcknowledged,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Relevance => "Relevance",
            Criterion::Accuracy => "Accuracy",
            Criterion::Tone => "Tone",
            Criterion::GapsAcknowledged => "Gaps Acknowledged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub passed: bool,
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "APPROVED",
            Verdict::Rejected => "REJECTED",
        }
    }
}

/// Rubric outcome for a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    pub criteria: Vec<CriterionResult>,
    pub verdict: Verdict,
    /// The answer that was evaluated, passed on to delivery
    pub answer: Option<Answer>,
}

impl EvaluationReport {
    /// APPROVED iff every criterion passed.
    pub fn from_criteria(criteria: Vec<CriterionResult>, answer: Option<Answer>) -> Self {
        let verdict = if criteria.iter().all(|c| c.passed) {
            Verdict::Approved
        } else {
            Verdict::Rejected
        };
        Self {
            criteria,
            verdict,
            answer,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.verdict == Verdict::Rejected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Sent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryConfirmation {
    pub channel: String,
    pub recipient: String,
    pub cc: Vec<String>,
    pub status: DeliveryStatus,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub heading: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    pub fn new(heading: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, heading: impl Into<String>, lines: Vec<String>) -> Self {
        self.sections.push(ReportSection::new(heading, lines));
        self
    }

    pub fn section(&self, heading: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}
