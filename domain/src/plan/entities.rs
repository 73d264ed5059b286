//! Plan entities: task identifiers and tasks

use crate::agent::Target;
use serde::{Deserialize, Serialize};

/// Sequential task identifier, rendered as `TASK-001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TaskId(u32);

impl TaskId {
    pub fn new(ordinal: u32) -> Self {
        Self(ordinal)
    }

    pub fn ordinal(&self) -> u32 {
        self.0
    }

    /// Identifier of the `index`-th sub-result: `TASK-001-A`, `TASK-001-B`, ...
    ///
    /// Past `Z` the suffix continues as `AA`, `AB`, ...
    pub fn sub_id(&self, index: usize) -> String {
        let mut suffix = Vec::new();
        let mut n = index + 1;
        while n > 0 {
            n -= 1;
            suffix.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        suffix.reverse();
        format!("{}-{}", self, String::from_utf8_lossy(&suffix))
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TASK-{:03}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix("TASK-")
            .and_then(|n| n.parse().ok())
            .map(TaskId)
            .ok_or_else(|| format!("invalid task id '{}'", s))
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for TaskId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single planned task.
///
/// Tasks are created in one batch by the planner and are read-only
/// afterwards; see [`TaskGraph`](super::TaskGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// L2 domain or L3 agent this task is delegated to
    pub target: Target,
    pub purpose: String,
    /// Tasks that must complete before this one, in declared order
    pub depends_on: Vec<TaskId>,
}

impl Task {
    pub fn new(id: TaskId, target: Target, purpose: impl Into<String>) -> Self {
        Self {
            id,
            target,
            purpose: purpose.into(),
            depends_on: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, depends_on: impl IntoIterator<Item = TaskId>) -> Self {
        self.depends_on = depends_on.into_iter().collect();
        self
    }

    pub fn depends_on(&self, other: TaskId) -> bool {
        self.depends_on.contains(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentName;

    #[test]
    fn test_task_id_display_and_parse() {
        let id = TaskId::new(7);
        assert_eq!(id.to_string(), "TASK-007");
        assert_eq!("TASK-007".parse::<TaskId>().unwrap(), id);
        assert_eq!("TASK-1234".parse::<TaskId>().unwrap().ordinal(), 1234);
        assert!("JOB-1".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_sub_ids() {
        let id = TaskId::new(2);
        assert_eq!(id.sub_id(0), "TASK-002-A");
        assert_eq!(id.sub_id(1), "TASK-002-B");
        assert_eq!(id.sub_id(25), "TASK-002-Z");
        assert_eq!(id.sub_id(26), "TASK-002-AA");
    }

    #[test]
    fn test_task_id_serializes_as_string() {
        let json = serde_json::to_string(&TaskId::new(1)).unwrap();
        assert_eq!(json, "\"TASK-001\"");
        let parsed: TaskId = serde_json::from_str("\"TASK-010\"").unwrap();
        assert_eq!(parsed, TaskId::new(10));
    }

    #[test]
    fn test_task_dependencies() {
        let task = Task::new(
            TaskId::new(3),
            Target::Agent(AgentName::Evaluation),
            "Evaluate response",
        )
        .with_dependencies([TaskId::new(2)]);
        assert!(task.depends_on(TaskId::new(2)));
        assert!(!task.depends_on(TaskId::new(1)));
    }
}
