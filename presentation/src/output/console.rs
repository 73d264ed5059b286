//! Console output formatter for orchestration runs
//!
//! The map keeps task declaration order in both the plan and the execution
//! sections, and nests sub-results under their parent task.

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use nion_application::OrchestrationRun;
use nion_domain::{ExtractionList, Payload, Report, Target, Task, TaskResult, TaskStatus};

const WIDTH: usize = 70;

/// Formats orchestration runs for console display
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormatter {
    color: bool,
}

impl ConsoleFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Format the complete orchestration map
    pub fn format_map(&self, run: &OrchestrationRun) -> String {
        let message = &run.message;
        let mut lines = Vec::new();

        lines.extend(self.header("NION ORCHESTRATION MAP"));
        lines.push(format!("Message: {}", message.id()));
        lines.push(format!(
            "From: {} ({})",
            message.sender().name,
            message.sender().role
        ));
        lines.push(format!("Source: {}", message.source()));
        lines.push(format!("Project: {}", message.project().unwrap_or("N/A")));
        lines.push(String::new());

        lines.extend(self.header("L1 REASONING"));
        let reasoning = &run.reasoning;
        lines.push(format!("Intent: {}", reasoning.intent));
        lines.push(format!("Urgency: {}", reasoning.urgency));
        lines.push(format!(
            "Strategy: {} (result from {})",
            run.strategy,
            reasoning.source_label()
        ));
        if run.fallbacks > 0 {
            lines.push(self.warn(&format!(
                "Fallbacks: {} backend call(s) fell back to rules",
                run.fallbacks
            )));
        }
        if let Some(rationale) = &reasoning.rationale {
            lines.push(format!("Rationale: {}", rationale));
        }
        lines.push(String::new());

        lines.extend(self.header("L1 PLAN"));
        for task in run.graph.tasks() {
            lines.extend(self.plan_entry(task));
            lines.push(String::new());
        }

        lines.extend(self.header("L2/L3 EXECUTION"));
        lines.push(String::new());
        for result in run.ledger.in_declaration_order() {
            lines.extend(self.execution_entry(result));
            lines.push(String::new());
        }

        if let Some(report) = run
            .ledger
            .in_execution_order()
            .iter()
            .flat_map(TaskResult::payloads)
            .find_map(|p| match p {
                Payload::Evaluation(report) => Some(report),
                _ => None,
            })
        {
            lines.extend(self.header("EVALUATION"));
            let verdict = format!("Verdict: {}", report.verdict.as_str());
            lines.push(if report.is_rejected() {
                self.bad(&verdict)
            } else {
                self.good(&verdict)
            });
            lines.push(String::new());
        }

        lines.push(self.rule());
        lines.join("\n")
    }

    /// Format as JSON
    pub fn format_run_json(run: &OrchestrationRun) -> String {
        serde_json::to_string_pretty(run).unwrap_or_else(|_| "{}".to_string())
    }

    fn plan_entry(&self, task: &Task) -> Vec<String> {
        let mut lines = vec![format!(
            "[{}] → {}{}",
            self.accent(&task.id.to_string()),
            task.target,
            cross_cutting_suffix(&task.target)
        )];
        lines.push(format!("Purpose: {}", task.purpose));
        if !task.depends_on.is_empty() {
            let deps: Vec<String> = task.depends_on.iter().map(ToString::to_string).collect();
            lines.push(format!("Depends On: {}", deps.join(", ")));
        }
        lines
    }

    fn execution_entry(&self, result: &TaskResult) -> Vec<String> {
        let mut lines = vec![format!(
            "[{}] {}{}",
            self.accent(&result.task_id.to_string()),
            result.target,
            cross_cutting_suffix(&result.target)
        )];

        match result.target {
            Target::Domain(_) if !result.sub_results.is_empty() => {
                for sub in &result.sub_results {
                    lines.push(format!("└─▶ [{}] L3:{}", sub.id, sub.agent));
                    lines.push(format!("    Status: {}", self.status(sub.status)));
                    if let Some(cause) = &sub.cause {
                        lines.push(format!("    Cause: {}", cause));
                    }
                    if let Some(payload) = &sub.payload {
                        lines.push("    Output:".to_string());
                        lines.extend(payload_lines(payload).iter().map(|l| format!("    {}", l)));
                    }
                }
            }
            _ => {
                lines.push(format!("Status: {}", self.status(result.status)));
                if let Some(cause) = &result.cause {
                    lines.push(format!("Cause: {}", cause));
                }
                if let Some(payload) = &result.payload {
                    lines.push("Output:".to_string());
                    lines.extend(payload_lines(payload));
                }
            }
        }
        lines
    }

    fn header(&self, title: &str) -> Vec<String> {
        let title = if self.color {
            title.cyan().bold().to_string()
        } else {
            title.to_string()
        };
        vec![self.rule(), title, self.rule()]
    }

    fn rule(&self) -> String {
        let line = "=".repeat(WIDTH);
        if self.color {
            line.cyan().to_string()
        } else {
            line
        }
    }

    fn status(&self, status: TaskStatus) -> String {
        let label = status.as_str().to_uppercase();
        match status {
            TaskStatus::Completed => self.good(&label),
            TaskStatus::Skipped => self.warn(&label),
            TaskStatus::Failed => self.bad(&label),
        }
    }

    fn accent(&self, text: &str) -> String {
        if self.color {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn good(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn bad(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, run: &OrchestrationRun) -> String {
        self.format_map(run)
    }

    fn format_json(&self, run: &OrchestrationRun) -> String {
        Self::format_run_json(run)
    }
}

fn cross_cutting_suffix(target: &Target) -> &'static str {
    match target {
        Target::Agent(_) => " (Cross-Cutting)",
        Target::Domain(_) => "",
    }
}

/// Bulleted lines describing a payload
fn payload_lines(payload: &Payload) -> Vec<String> {
    let bullet = |line: &str| format!("• {}", line);
    match payload {
        Payload::Extraction(list) => extraction_lines(list),
        Payload::Context(snapshot) => snapshot.lines().iter().map(|l| bullet(l)).collect(),
        Payload::Response(answer) => {
            let mut lines = Vec::new();
            for (title, section) in [
                ("WHAT I KNOW", &answer.known),
                ("WHAT I'VE LOGGED", &answer.logged),
                ("WHAT I NEED", &answer.needed),
            ] {
                lines.push(format!("{}:", title));
                if section.is_empty() {
                    lines.push("  • (nothing yet)".to_string());
                }
                lines.extend(section.iter().map(|l| format!("  {}", bullet(l))));
            }
            if !answer.narrative.is_empty() {
                let origin = if answer.narrative_from_backend {
                    "backend"
                } else {
                    "rules"
                };
                lines.push(format!("Narrative ({}): {}", origin, answer.narrative));
            }
            lines
        }
        Payload::Evaluation(report) => {
            let mut lines: Vec<String> = report
                .criteria
                .iter()
                .map(|c| {
                    bullet(&format!(
                        "{}: {} ({})",
                        c.criterion.label(),
                        if c.passed { "PASS" } else { "FAIL" },
                        c.note
                    ))
                })
                .collect();
            lines.push(bullet(&format!("Verdict: {}", report.verdict.as_str())));
            lines
        }
        Payload::Delivery(delivery) => {
            let mut lines = vec![
                bullet(&format!("Channel: {}", delivery.channel)),
                bullet(&format!("Recipient: {}", delivery.recipient)),
            ];
            if !delivery.cc.is_empty() {
                lines.push(bullet(&format!("CC: {}", delivery.cc.join(", "))));
            }
            lines.push(bullet(&format!(
                "Status: {}",
                format!("{:?}", delivery.status).to_uppercase()
            )));
            lines
        }
        Payload::Report(report) => report_lines(report),
    }
}

fn extraction_lines(list: &ExtractionList) -> Vec<String> {
    if list.is_empty() {
        return vec![format!("• No {} found", list.kind().title().to_lowercase())];
    }
    list.display_lines()
        .into_iter()
        .flat_map(|(headline, detail)| [format!("• {}", headline), format!("  {}", detail)])
        .collect()
}

fn report_lines(report: &Report) -> Vec<String> {
    let mut lines = vec![format!("• {}", report.title)];
    for section in &report.sections {
        lines.push(format!("  {}:", section.heading));
        lines.extend(section.lines.iter().map(|l| format!("    - {}", l)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use nion_application::{ProjectFactStore, RuleBasedReasoning, RunOrchestrationUseCase};
    use nion_domain::{InputMessage, ProjectFacts, Sender, SourceChannel};
    use std::sync::Arc;

    struct Alpha;

    impl ProjectFactStore for Alpha {
        fn lookup(&self, project: &str) -> Option<ProjectFacts> {
            (project == "PRJ-ALPHA").then(|| ProjectFacts {
                release_date: "Dec 15, 2025".to_string(),
                code_freeze: "Dec 10, 2025".to_string(),
                days_remaining: 9,
                progress_percent: 70,
                capacity_percent: 85,
                engineering_manager: "Alex Kim".to_string(),
                tech_lead: "David Park".to_string(),
            })
        }
    }

    async fn run(content: &str) -> OrchestrationRun {
        let message = InputMessage::new(
            "MSG-001",
            SourceChannel::Email,
            Sender::new("Sarah Chen", "Product Manager"),
            content,
        )
        .with_project("PRJ-ALPHA");
        RunOrchestrationUseCase::new(Arc::new(RuleBasedReasoning::new()), Arc::new(Alpha))
            .execute(message)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_map_layout() {
        let run = run("What's the status of the authentication feature?").await;
        let map = ConsoleFormatter::plain().format(&run);

        assert!(map.starts_with(&"=".repeat(WIDTH)));
        assert!(map.contains("NION ORCHESTRATION MAP"));
        assert!(map.contains("From: Sarah Chen (Product Manager)"));
        assert!(map.contains("Intent: status_query"));
        assert!(map.contains("[TASK-001] → L3:knowledge_retrieval (Cross-Cutting)"));
        assert!(map.contains("Depends On: TASK-001, TASK-002"));
        assert!(map.contains("└─▶ [TASK-002-A] L3:action_item_extraction"));
        assert!(map.contains("└─▶ [TASK-004-A] L3:message_delivery"));
        assert!(map.contains("• Current Release Date: Dec 15, 2025"));
        assert!(!map.contains("EVALUATION"));

        let plan = map.find("L1 PLAN").unwrap();
        let execution = map.find("L2/L3 EXECUTION").unwrap();
        assert!(plan < execution);
        let first = map[execution..].find("[TASK-001]").unwrap();
        let fourth = map[execution..].find("[TASK-004]").unwrap();
        assert!(first < fourth);
    }

    #[tokio::test]
    async fn test_map_shows_verdict() {
        let run = run("Can we add SSO integration before the December release?").await;
        let map = ConsoleFormatter::plain().format(&run);
        assert!(map.contains("EVALUATION"));
        assert!(map.contains("Verdict: "));
        assert!(map.contains("• Gaps Acknowledged: "));
        assert!(map.contains("└─▶ [TASK-007-A] L3:message_delivery"));
    }

    #[tokio::test]
    async fn test_json_output() {
        let run = run("What's the status?").await;
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::plain().format_json(&run)).unwrap();
        assert_eq!(json["message"]["message_id"], "MSG-001");
        assert_eq!(json["graph"]["tasks"][0]["id"], "TASK-001");
        assert_eq!(json["ledger"]["results"][3]["status"], "completed");
    }
}
