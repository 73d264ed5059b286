//! Instruction-led learning agent

use super::{Agent, AgentError, AgentInput};
use async_trait::async_trait;
use nion_domain::util::{contains_phrase, sentences};
use nion_domain::{AgentName, Payload, Report};

const INSTRUCTION_CUES: [&str; 7] = [
    "always",
    "never",
    "from now on",
    "make sure",
    "going forward",
    "remember",
    "please ensure",
];

/// Captures standing instructions ("from now on, cc the tech lead") so a
/// later run could honor them. Nothing is persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionLearningAgent;

impl InstructionLearningAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn instructions<'t>(&self, text: &'t str) -> Vec<&'t str> {
        sentences(text)
            .into_iter()
            .filter(|sentence| {
                let lower = sentence.to_lowercase();
                INSTRUCTION_CUES
                    .iter()
                    .any(|cue| contains_phrase(&lower, cue))
            })
            .collect()
    }
}

#[async_trait]
impl Agent for InstructionLearningAgent {
    fn name(&self) -> AgentName {
        AgentName::InstructionLedLearning
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        let found = self.instructions(input.message.content());
        let lines = if found.is_empty() {
            vec!["No standing instructions found".to_string()]
        } else {
            found.into_iter().map(String::from).collect()
        };
        Ok(Payload::Report(
            Report::new("Standing Instructions").with_section("Instructions", lines),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_standing_instructions() {
        let agent = InstructionLearningAgent::new();
        let found = agent.instructions(
            "Thanks for the update. From now on, cc David on release notes. Always use the staging env first.",
        );
        assert_eq!(
            found,
            vec![
                "From now on, cc David on release notes.",
                "Always use the staging env first."
            ]
        );
    }

    #[test]
    fn test_ignores_plain_text() {
        assert!(
            InstructionLearningAgent::new()
                .instructions("Can you send the notes?")
                .is_empty()
        );
    }
}
