//! Report generation agent

use super::meeting::MINUTES_TITLE;
use super::{Agent, AgentError, AgentInput};
use async_trait::async_trait;
use nion_domain::{AgentName, ExtractionKind, Payload, Report, Upstream};

/// Assembles upstream minutes and extractions into one summary report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportGenerationAgent;

impl ReportGenerationAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, upstream: &Upstream<'_>) -> Report {
        let minutes = upstream.reports().find(|r| r.title == MINUTES_TITLE);
        let title = if minutes.is_some() {
            "Meeting Summary"
        } else {
            "Status Summary"
        };
        let mut report = Report::new(title);

        if let Some(minutes) = minutes {
            for section in &minutes.sections {
                report = report.with_section(section.heading.clone(), section.lines.clone());
            }
        }

        for kind in ExtractionKind::ALL {
            let lines: Vec<String> = upstream
                .extractions()
                .filter(|list| list.kind() == kind)
                .flat_map(|list| list.display_lines())
                .map(|(headline, detail)| format!("{} ({})", headline, detail))
                .collect();
            if !lines.is_empty() {
                report = report.with_section(kind.title(), lines);
            }
        }

        let flags = upstream.gap_flags();
        let next_steps = if flags.is_empty() {
            vec!["No open follow-ups".to_string()]
        } else {
            flags
                .iter()
                .map(|flag| format!("Confirm: {}", flag.needed_line()))
                .collect()
        };
        report.with_section("Next Steps", next_steps)
    }
}

#[async_trait]
impl Agent for ReportGenerationAgent {
    fn name(&self) -> AgentName {
        AgentName::ReportGeneration
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        Ok(Payload::Report(self.compose(&input.upstream)))
    }
}
