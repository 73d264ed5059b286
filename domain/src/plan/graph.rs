//! Checked task graph construction
//!
//! A [`TaskGraph`] can only be obtained through [`TaskGraph::new`] or
//! [`TaskGraph::from_template`], both of which validate the whole batch:
//! unique identifiers, known dependencies, no self-dependencies, no cycles,
//! no forward references, and every target reachable by the planner under
//! the visibility rules.

use super::entities::{Task, TaskId};
use super::template::PlanTemplate;
use crate::agent::{AgentRegistry, Requester, VisibilityError};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

/// Reasons a batch of tasks is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Task {0} is declared more than once")]
    DuplicateTask(TaskId),

    #[error("Task {task} depends on undeclared task {dependency}")]
    UnknownDependency { task: TaskId, dependency: TaskId },

    #[error("Task {0} depends on itself")]
    SelfDependency(TaskId),

    #[error("Dependency cycle among {}", join_ids(.0))]
    Cycle(Vec<TaskId>),

    #[error("Task {task} depends on {dependency}, which is declared after it")]
    ForwardReference { task: TaskId, dependency: TaskId },

    #[error("Unreachable target: {0}")]
    Visibility(#[from] VisibilityError),
}

fn join_ids(ids: &[TaskId]) -> String {
    ids.iter()
        .map(TaskId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validated, immutable batch of tasks in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskGraph {
    tasks: Vec<Task>,
}

impl TaskGraph {
    /// Validate `tasks` and freeze them into a graph.
    pub fn new(tasks: Vec<Task>, registry: &AgentRegistry) -> Result<Self, PlanError> {
        let mut positions = HashMap::with_capacity(tasks.len());
        for (position, task) in tasks.iter().enumerate() {
            if positions.insert(task.id, position).is_some() {
                return Err(PlanError::DuplicateTask(task.id));
            }
        }

        for task in &tasks {
            for dependency in &task.depends_on {
                if *dependency == task.id {
                    return Err(PlanError::SelfDependency(task.id));
                }
                if !positions.contains_key(dependency) {
                    return Err(PlanError::UnknownDependency {
                        task: task.id,
                        dependency: *dependency,
                    });
                }
            }
        }

        let graph = Self { tasks };
        let order = graph.topological_order();
        if order.len() < graph.tasks.len() {
            let resolved: HashSet<TaskId> = order.iter().map(|t| t.id).collect();
            let stuck = graph
                .tasks
                .iter()
                .map(|t| t.id)
                .filter(|id| !resolved.contains(id))
                .collect();
            return Err(PlanError::Cycle(stuck));
        }

        for (position, task) in graph.tasks.iter().enumerate() {
            for dependency in &task.depends_on {
                if positions[dependency] > position {
                    return Err(PlanError::ForwardReference {
                        task: task.id,
                        dependency: *dependency,
                    });
                }
            }
        }

        for task in &graph.tasks {
            registry.resolve(Requester::Planner, &task.target)?;
        }

        Ok(graph)
    }

    /// Instantiate a template with dense identifiers starting at `TASK-001`.
    pub fn from_template(
        template: &PlanTemplate,
        registry: &AgentRegistry,
    ) -> Result<Self, PlanError> {
        let id_for = |index: usize| TaskId::new(index as u32 + 1);
        let tasks = template
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                Task::new(id_for(index), step.target, step.purpose)
                    .with_dependencies(step.depends_on.iter().map(|dep| id_for(*dep)))
            })
            .collect();
        Self::new(tasks, registry)
    }

    /// Tasks in declaration order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks that declare `id` as a dependency
    pub fn dependents_of(&self, id: TaskId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.depends_on(id))
    }

    /// Kahn's algorithm; ready tasks are taken in ascending identifier order.
    ///
    /// On a cyclic batch the returned order is shorter than the graph.
    pub fn topological_order(&self) -> Vec<&Task> {
        let mut remaining: HashMap<TaskId, usize> = self
            .tasks
            .iter()
            .map(|t| {
                let distinct: HashSet<&TaskId> = t.depends_on.iter().collect();
                (t.id, distinct.len())
            })
            .collect();
        let mut ready: BTreeSet<TaskId> = remaining
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect();

        let mut order = Vec::with_capacity(self.tasks.len());
        while let Some(id) = ready.pop_first() {
            let Some(task) = self.get(id) else {
                continue;
            };
            order.push(task);
            for dependent in self.dependents_of(id) {
                if let Some(count) = remaining.get_mut(&dependent.id) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(dependent.id);
                    }
                }
            }
        }
        order
    }
}
