//! Execution ledger
//!
//! Owned by the executor for one run. Results are appended once per task
//! and never replaced.

use super::result::{TaskResult, TaskStatus};
use super::upstream::Upstream;
use crate::core::error::DomainError;
use crate::plan::{Task, TaskGraph, TaskId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionLedger {
    #[serde(skip)]
    declared: Vec<TaskId>,
    /// Results in execution order
    results: Vec<TaskResult>,
}

impl ExecutionLedger {
    /// Empty ledger accepting results for the tasks of `graph`.
    pub fn for_graph(graph: &TaskGraph) -> Self {
        Self {
            declared: graph.tasks().iter().map(|t| t.id).collect(),
            results: Vec::with_capacity(graph.len()),
        }
    }

    pub fn record(&mut self, result: TaskResult) -> Result<(), DomainError> {
        if !self.declared.contains(&result.task_id) {
            return Err(DomainError::UnknownTask(result.task_id));
        }
        if self.get(result.task_id).is_some() {
            return Err(DomainError::DuplicateResult(result.task_id));
        }
        self.results.push(result);
        Ok(())
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskResult> {
        self.results.iter().find(|r| r.task_id == id)
    }

    pub fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        self.get(id).map(|r| r.status)
    }

    /// Results in the order they were recorded
    pub fn in_execution_order(&self) -> &[TaskResult] {
        &self.results
    }

    /// Results ordered as their tasks were declared
    pub fn in_declaration_order(&self) -> impl Iterator<Item = &TaskResult> {
        self.declared.iter().filter_map(|id| self.get(*id))
    }

    /// Results of the tasks `task` depends on
    pub fn upstream_for(&self, task: &Task) -> Upstream<'_> {
        Upstream::new(task.depends_on.iter().filter_map(|id| self.get(*id)))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Every declared task has a terminal result
    pub fn is_complete(&self) -> bool {
        self.declared.iter().all(|id| self.get(*id).is_some())
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}
