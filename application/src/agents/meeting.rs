//! Meeting attendance agent

use super::{Agent, AgentError, AgentInput};
use async_trait::async_trait;
use nion_domain::util::sentences;
use nion_domain::{AgentName, Payload, Report};

pub const MINUTES_TITLE: &str = "Meeting Minutes";

const NOT_RECORDED: &str = "Not recorded";

/// Turns a transcript into minutes: who spoke and what was said.
///
/// Transcript lines of the form `Name: text` are treated as speaker
/// turns. A transcript without speaker turns is split into sentences, and
/// an empty one still yields minutes with both sections marked not recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeetingAttendanceAgent;

impl MeetingAttendanceAgent {
    pub fn new() -> Self {
        Self
    }

    fn speaker_turn(line: &str) -> Option<(&str, &str)> {
        let (speaker, text) = line.split_once(':')?;
        let speaker = speaker.trim();
        let words = speaker.split_whitespace().count();
        let looks_like_name = (1..=3).contains(&words)
            && speaker
                .chars()
                .next()
                .is_some_and(|c| c.is_uppercase())
            && speaker.chars().all(|c| c.is_alphabetic() || c == ' ' || c == '.');
        let text = text.trim();
        (looks_like_name && !text.is_empty()).then_some((speaker, text))
    }

    pub fn minutes(&self, transcript: &str) -> Report {
        let mut participants: Vec<String> = Vec::new();
        let mut points: Vec<String> = Vec::new();

        for line in transcript.lines() {
            if let Some((speaker, text)) = Self::speaker_turn(line) {
                if !participants.iter().any(|p| p == speaker) {
                    participants.push(speaker.to_string());
                }
                points.push(format!("{}: {}", speaker, text));
            }
        }
        if points.is_empty() {
            points = sentences(transcript).into_iter().map(String::from).collect();
        }
        if participants.is_empty() {
            participants.push(NOT_RECORDED.to_string());
        }
        if points.is_empty() {
            points.push(NOT_RECORDED.to_string());
        }

        Report::new(MINUTES_TITLE)
            .with_section("Participants", participants)
            .with_section("Key Points", points)
    }
}

#[async_trait]
impl Agent for MeetingAttendanceAgent {
    fn name(&self) -> AgentName {
        AgentName::MeetingAttendance
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        Ok(Payload::Report(self.minutes(input.message.content())))
    }
}
