//! Task results

use super::payload::Payload;
use crate::agent::{AgentName, Target};
use crate::plan::{Task, TaskId};
use serde::Serialize;

/// Terminal state of a task or sub-result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    Skipped,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of one L3 agent invoked by a coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubResult {
    /// `TASK-00N-A`, `TASK-00N-B`, ...
    pub id: String,
    pub agent: AgentName,
    pub purpose: String,
    pub status: TaskStatus,
    pub payload: Option<Payload>,
    pub cause: Option<String>,
}

impl SubResult {
    pub fn completed(
        id: impl Into<String>,
        agent: AgentName,
        purpose: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            id: id.into(),
            agent,
            purpose: purpose.into(),
            status: TaskStatus::Completed,
            payload: Some(payload),
            cause: None,
        }
    }

    pub fn failed(
        id: impl Into<String>,
        agent: AgentName,
        purpose: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            agent,
            purpose: purpose.into(),
            status: TaskStatus::Failed,
            payload: None,
            cause: Some(cause.into()),
        }
    }
}

/// Result recorded for one planned task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResult {
    pub task_id: TaskId,
    pub target: Target,
    pub status: TaskStatus,
    /// Set when a cross-cutting agent ran the task directly
    pub payload: Option<Payload>,
    /// Set when an L2 coordinator delegated the task
    pub sub_results: Vec<SubResult>,
    pub cause: Option<String>,
}

impl TaskResult {
    /// A task an agent answered directly.
    pub fn completed(task: &Task, payload: Payload) -> Self {
        Self {
            task_id: task.id,
            target: task.target,
            status: TaskStatus::Completed,
            payload: Some(payload),
            sub_results: Vec::new(),
            cause: None,
        }
    }

    /// A task a coordinator expanded into sub-results.
    ///
    /// Completed only when every sub-result completed; otherwise failed with
    /// the first failure as cause.
    pub fn delegated(task: &Task, sub_results: Vec<SubResult>) -> Self {
        let failure = sub_results
            .iter()
            .find(|s| !s.status.is_success())
            .map(|s| {
                format!(
                    "{} ({}) {}: {}",
                    s.id,
                    s.agent,
                    s.status,
                    s.cause.as_deref().unwrap_or("no cause recorded")
                )
            });
        Self {
            task_id: task.id,
            target: task.target,
            status: if failure.is_some() {
                TaskStatus::Failed
            } else {
                TaskStatus::Completed
            },
            payload: None,
            sub_results,
            cause: failure,
        }
    }

    pub fn skipped(task: &Task, cause: impl Into<String>) -> Self {
        Self::terminal(task, TaskStatus::Skipped, cause)
    }

    pub fn failed(task: &Task, cause: impl Into<String>) -> Self {
        Self::terminal(task, TaskStatus::Failed, cause)
    }

    fn terminal(task: &Task, status: TaskStatus, cause: impl Into<String>) -> Self {
        Self {
            task_id: task.id,
            target: task.target,
            status,
            payload: None,
            sub_results: Vec::new(),
            cause: Some(cause.into()),
        }
    }

    /// Own payload first, then sub-result payloads in dispatch order.
    pub fn payloads(&self) -> impl Iterator<Item = &Payload> {
        self.payload
            .iter()
            .chain(self.sub_results.iter().filter_map(|s| s.payload.as_ref()))
    }
}
