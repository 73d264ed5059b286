//! Rule-based reasoning
//!
//! Deterministic keyword heuristics over the message content and sender
//! role. Both functions are total: every input produces a result.

use super::value_objects::{Intent, ReasoningResult, Signals, SynthesisContext, Urgency};
use crate::message::{InputMessage, SourceChannel};
use crate::util::{contains_phrase, first_phrase};

const ESCALATION_CUES: &[&str] = &[
    "escalate",
    "legal",
    "threat",
    "urgent",
    "blocked",
    "outage",
    "production down",
    "critical",
];
const DECISION_CUES: &[&str] = &[
    "should we",
    "prioritize",
    "prioritise",
    "decide",
    "choose between",
    "which option",
];
const FEASIBILITY_CUES: &[&str] = &["can we", "could we", "is it possible", "feasible", "able to"];
const STATUS_CUES: &[&str] = &[
    "status",
    "update",
    "progress",
    "what",
    "where are we",
    "how is",
    "how are",
];
const MEETING_CUES: &[&str] = &["meeting", "transcript", "demo", "standup", "minutes"];
const IMMEDIACY_CUES: &[&str] = &["asap", "immediately", "today"];
const EXECUTIVE_ROLES: &[&str] = &["vp", "vice president", "director", "cto", "ceo", "head of"];

const ACTION_SIGNALS: &[&str] = &["add", "create", "implement", "fix", "update", "review"];
const RISK_SIGNALS: &[&str] = &["risk", "concern", "timeline", "deadline"];
const ISSUE_SIGNALS: &[&str] = &["blocked", "down", "bug", "issue", "problem", "broken"];
const DECISION_SIGNALS: &[&str] = &["decide", "should", "prioritize", "choose", "approve"];

/// Classify a message with keyword rules.
///
/// Cues are checked in a fixed order and the first match wins: escalation,
/// decision, feasibility, status, meeting, then general.
pub fn classify_by_rules(message: &InputMessage) -> ReasoningResult {
    let content = message.content().to_lowercase();
    let is_question = content.contains('?');

    let (intent, cue) = if let Some(cue) = first_phrase(&content, ESCALATION_CUES) {
        (Intent::Escalation, Some(cue))
    } else if let Some(cue) = first_phrase(&content, DECISION_CUES) {
        (Intent::DecisionRequest, Some(cue))
    } else if let Some(cue) = first_phrase(&content, FEASIBILITY_CUES).filter(|_| is_question) {
        (Intent::FeasibilityQuery, Some(cue))
    } else if let Some(cue) = first_phrase(&content, STATUS_CUES).filter(|_| is_question) {
        (Intent::StatusQuery, Some(cue))
    } else if let Some(cue) = first_phrase(&content, MEETING_CUES) {
        (Intent::MeetingUpdate, Some(cue))
    } else if *message.source() == SourceChannel::Meeting {
        (Intent::MeetingUpdate, Some("meeting channel"))
    } else {
        (Intent::GeneralRequest, None)
    };

    let urgency = urgency_for(intent, &content, is_question, &message.sender().role);

    let rationale = match cue {
        Some(cue) => format!("Rule-based analysis: matched '{}'", cue),
        None => "Rule-based analysis: no specific cue matched".to_string(),
    };

    ReasoningResult::new(intent, urgency)
        .with_rationale(rationale)
        .with_signals(signals_for(&content))
}

fn urgency_for(intent: Intent, content: &str, is_question: bool, role: &str) -> Urgency {
    if intent == Intent::Escalation || first_phrase(content, IMMEDIACY_CUES).is_some() {
        return Urgency::High;
    }
    let base = if is_question {
        Urgency::Medium
    } else {
        Urgency::Low
    };
    let role = role.to_lowercase();
    if base == Urgency::Low && first_phrase(&role, EXECUTIVE_ROLES).is_some() {
        Urgency::Medium
    } else {
        base
    }
}

fn signals_for(content: &str) -> Signals {
    let any = |cues: &[&str]| cues.iter().any(|cue| contains_phrase(content, cue));
    Signals {
        has_action_items: any(ACTION_SIGNALS),
        has_risks: any(RISK_SIGNALS),
        has_issues: any(ISSUE_SIGNALS),
        has_decisions: any(DECISION_SIGNALS),
    }
}

/// Compose a deterministic narrative from a synthesis context.
///
/// The prompt is not interpreted; the narrative is built only from the
/// structured context so that repeated runs produce identical text.
pub fn synthesize_by_rules(_prompt: &str, context: &SynthesisContext) -> String {
    if context.known.is_empty() && context.logged.is_empty() {
        return "Message acknowledged and processed.".to_string();
    }

    let mut parts = Vec::new();
    match context.known.first() {
        Some(first) if context.known.len() > 1 => parts.push(format!(
            "Here is what I know so far: {} (plus {} more facts).",
            first,
            context.known.len() - 1
        )),
        Some(first) => parts.push(format!("Here is what I know so far: {}.", first)),
        None => parts.push("I have limited project context right now.".to_string()),
    }
    if !context.logged.is_empty() {
        parts.push(format!("I've logged {}.", context.logged.join(", ")));
    }
    if !context.needed.is_empty() {
        parts.push(format!(
            "To give a complete answer I still need: {}.",
            context
                .needed
                .iter()
                .map(|n| n.trim_end_matches('.').to_lowercase())
                .collect::<Vec<_>>()
                .join("; ")
        ));
    }
    parts.join(" ")
}
