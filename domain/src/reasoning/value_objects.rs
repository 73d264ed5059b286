//! Reasoning value objects

use serde::{Deserialize, Serialize};

/// Classified intent of an inbound message.
///
/// The set is closed: anything unrecognized maps to
/// [`Intent::GeneralRequest`], never to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    StatusQuery,
    FeasibilityQuery,
    DecisionRequest,
    Escalation,
    MeetingUpdate,
    GeneralRequest,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::StatusQuery,
        Intent::FeasibilityQuery,
        Intent::DecisionRequest,
        Intent::Escalation,
        Intent::MeetingUpdate,
        Intent::GeneralRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::StatusQuery => "status_query",
            Intent::FeasibilityQuery => "feasibility_query",
            Intent::DecisionRequest => "decision_request",
            Intent::Escalation => "escalation",
            Intent::MeetingUpdate => "meeting_update",
            Intent::GeneralRequest => "general_request",
        }
    }

    /// Total parse: unknown labels become `GeneralRequest`.
    pub fn parse_lenient(s: &str) -> Self {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
            .unwrap_or(Intent::GeneralRequest)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Total parse: unknown labels become `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Urgency::Low,
            "high" | "critical" => Urgency::High,
            _ => Urgency::Medium,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content signals detected alongside the intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    pub has_action_items: bool,
    pub has_risks: bool,
    pub has_issues: bool,
    pub has_decisions: bool,
}

/// Outcome of classifying one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub intent: Intent,
    pub urgency: Urgency,
    pub rationale: Option<String>,
    #[serde(default)]
    pub signals: Signals,
    /// True when the external backend produced this result, false when the
    /// rule-based classifier did.
    pub from_backend: bool,
}

impl ReasoningResult {
    pub fn new(intent: Intent, urgency: Urgency) -> Self {
        Self {
            intent,
            urgency,
            rationale: None,
            signals: Signals::default(),
            from_backend: false,
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn with_signals(mut self, signals: Signals) -> Self {
        self.signals = signals;
        self
    }

    pub fn from_backend(mut self) -> Self {
        self.from_backend = true;
        self
    }

    pub fn source_label(&self) -> &'static str {
        if self.from_backend {
            "backend"
        } else {
            "rules"
        }
    }
}

/// Context block handed to free-text synthesis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisContext {
    /// Original message content
    pub message: String,
    pub sender_role: String,
    /// Facts retrieved about the project
    pub known: Vec<String>,
    /// What has been logged during this run
    pub logged: Vec<String>,
    /// Missing information
    pub needed: Vec<String>,
}

impl SynthesisContext {
    /// Formats the context for inclusion in a prompt
    pub fn to_prompt_block(&self) -> String {
        let section = |title: &str, lines: &[String]| {
            if lines.is_empty() {
                format!("{}:\n- (none)", title)
            } else {
                format!("{}:\n- {}", title, lines.join("\n- "))
            }
        };
        [
            format!("Original Message: \"{}\"", self.message),
            format!("Sender Role: {}", self.sender_role),
            section("Known", &self.known),
            section("Logged", &self.logged),
            section("Needed", &self.needed),
        ]
        .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_parse_lenient() {
        assert_eq!(Intent::parse_lenient("status_query"), Intent::StatusQuery);
        assert_eq!(Intent::parse_lenient("Decision Request"), Intent::DecisionRequest);
        assert_eq!(Intent::parse_lenient("feasibility-query"), Intent::FeasibilityQuery);
        assert_eq!(Intent::parse_lenient("small_talk"), Intent::GeneralRequest);
        assert_eq!(Intent::parse_lenient(""), Intent::GeneralRequest);
    }

    #[test]
    fn test_urgency_parse_lenient() {
        assert_eq!(Urgency::parse_lenient("HIGH"), Urgency::High);
        assert_eq!(Urgency::parse_lenient("low"), Urgency::Low);
        assert_eq!(Urgency::parse_lenient("whenever"), Urgency::Medium);
    }

    #[test]
    fn test_intent_serde_round_trip_names() {
        let json = serde_json::to_string(&Intent::MeetingUpdate).unwrap();
        assert_eq!(json, "\"meeting_update\"");
    }

    #[test]
    fn test_prompt_block_marks_empty_sections() {
        let ctx = SynthesisContext {
            message: "Can we ship?".to_string(),
            sender_role: "PM".to_string(),
            known: vec!["Release: Dec 15".to_string()],
            ..Default::default()
        };
        let block = ctx.to_prompt_block();
        assert!(block.contains("Known:\n- Release: Dec 15"));
        assert!(block.contains("Logged:\n- (none)"));
    }
}
