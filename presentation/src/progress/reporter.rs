//! Progress reporting for orchestration runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use nion_application::RunProgressNotifier;
use nion_domain::{ExecutionLedger, ReasoningResult, Task, TaskGraph, TaskResult, TaskStatus};
use std::sync::Mutex;

/// Reports progress with a task bar drawn on stderr
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn task_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn status_mark(status: TaskStatus) -> String {
    match status {
        TaskStatus::Completed => "v".green().to_string(),
        TaskStatus::Skipped => "-".yellow().to_string(),
        TaskStatus::Failed => "x".red().to_string(),
    }
}

impl RunProgressNotifier for ProgressReporter {
    fn on_plan_ready(&self, graph: &TaskGraph) {
        let pb = ProgressBar::with_draw_target(
            Some(graph.len() as u64),
            ProgressDrawTarget::stderr(),
        );
        pb.set_style(Self::task_style());
        pb.set_prefix("Executing plan");
        pb.set_message("Starting...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_task_start(&self, task: &Task) {
        self.with_bar(|pb| pb.set_message(format!("{} → {}", task.id, task.target)));
    }

    fn on_task_complete(&self, task: &Task, result: &TaskResult) {
        self.with_bar(|pb| {
            pb.set_message(format!("{} {}", status_mark(result.status), task.id));
            pb.inc(1);
        });
    }

    fn on_run_complete(&self, ledger: &ExecutionLedger) {
        let finished = self.bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pb) = finished {
            let failed = ledger.count(TaskStatus::Failed) + ledger.count(TaskStatus::Skipped);
            if failed == 0 {
                pb.finish_with_message(format!("{}", "Plan complete!".green()));
            } else {
                pb.finish_with_message(format!(
                    "{}",
                    format!("Plan finished with {} unsuccessful task(s)", failed).yellow()
                ));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RunProgressNotifier for SimpleProgress {
    fn on_reasoning(&self, reasoning: &ReasoningResult, strategy: &str) {
        eprintln!(
            "{} {} ({} urgency, via {})",
            "->".cyan(),
            reasoning.intent.as_str().bold(),
            reasoning.urgency,
            strategy
        );
    }

    fn on_plan_ready(&self, graph: &TaskGraph) {
        eprintln!("{} {} tasks planned", "->".cyan(), graph.len());
    }

    fn on_task_complete(&self, task: &Task, result: &TaskResult) {
        match &result.cause {
            Some(cause) => eprintln!("  {} {} ({})", status_mark(result.status), task.id, cause),
            None => eprintln!("  {} {} {}", status_mark(result.status), task.id, task.target),
        }
    }

    fn on_run_complete(&self, _ledger: &ExecutionLedger) {
        eprintln!();
    }
}
