//! Reasoning strategy interface and the rule-based implementation

use async_trait::async_trait;
use nion_domain::{
    InputMessage, ReasoningResult, SynthesisContext, classify_by_rules, synthesize_by_rules,
};
use serde::Serialize;

/// Free text produced by a strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Synthesis {
    pub text: String,
    /// False when the rule-based path produced the text
    pub from_backend: bool,
}

/// Polymorphic reasoning used by the planner and agents.
///
/// Both operations are total: implementations never return an error. The
/// process picks one implementation at startup and injects it.
#[async_trait]
pub trait ReasoningStrategy: Send + Sync {
    /// Name shown in run output
    fn name(&self) -> &'static str;

    async fn classify(&self, message: &InputMessage) -> ReasoningResult;

    async fn synthesize(&self, prompt: &str, context: &SynthesisContext) -> Synthesis;

    /// How many calls fell back to rules so far
    fn fallback_count(&self) -> usize {
        0
    }
}

/// Deterministic keyword strategy; never calls out.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedReasoning;

impl RuleBasedReasoning {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous classification, shared with the backend fallback path.
    pub fn classify_now(&self, message: &InputMessage) -> ReasoningResult {
        classify_by_rules(message)
    }

    pub fn synthesize_now(&self, prompt: &str, context: &SynthesisContext) -> Synthesis {
        Synthesis {
            text: synthesize_by_rules(prompt, context),
            from_backend: false,
        }
    }
}

#[async_trait]
impl ReasoningStrategy for RuleBasedReasoning {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn classify(&self, message: &InputMessage) -> ReasoningResult {
        self.classify_now(message)
    }

    async fn synthesize(&self, prompt: &str, context: &SynthesisContext) -> Synthesis {
        self.synthesize_now(prompt, context)
    }
}
