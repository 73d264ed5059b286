//! Read-only view over the results a task depends on

use super::payload::{Answer, ContextSnapshot, EvaluationReport, Payload, Report};
use super::result::TaskResult;
use crate::plan::TaskId;
use crate::tracking::{ExtractionKind, ExtractionList, GapFlags};
use std::collections::BTreeMap;

/// Upstream results keyed by task identifier.
///
/// Agents read their inputs through this view without knowing the graph.
#[derive(Debug, Clone, Default)]
pub struct Upstream<'a> {
    results: BTreeMap<TaskId, &'a TaskResult>,
}

impl<'a> Upstream<'a> {
    pub fn new(results: impl IntoIterator<Item = &'a TaskResult>) -> Self {
        Self {
            results: results.into_iter().map(|r| (r.task_id, r)).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TaskId) -> Option<&'a TaskResult> {
        self.results.get(&id).copied()
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.results.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Every payload, in ascending task order
    pub fn payloads(&self) -> impl Iterator<Item = &'a Payload> + '_ {
        self.results.values().copied().flat_map(TaskResult::payloads)
    }

    pub fn context(&self) -> Option<&'a ContextSnapshot> {
        self.payloads().find_map(|p| match p {
            Payload::Context(snapshot) => Some(snapshot),
            _ => None,
        })
    }

    pub fn extractions(&self) -> impl Iterator<Item = &'a ExtractionList> + '_ {
        self.payloads().filter_map(|p| match p {
            Payload::Extraction(list) => Some(list),
            _ => None,
        })
    }

    /// Total items of `kind` across all upstream extractions
    pub fn count(&self, kind: ExtractionKind) -> usize {
        self.extractions()
            .filter(|list| list.kind() == kind)
            .map(ExtractionList::len)
            .sum()
    }

    /// Union of gap flags across all upstream extractions
    pub fn gap_flags(&self) -> GapFlags {
        self.extractions().flat_map(|list| list.flags()).collect()
    }

    /// The answer from a response, or the one carried by an evaluation.
    pub fn answer(&self) -> Option<&'a Answer> {
        self.payloads().find_map(|p| match p {
            Payload::Response(answer) => Some(answer),
            Payload::Evaluation(report) => report.answer.as_ref(),
            _ => None,
        })
    }

    pub fn evaluation(&self) -> Option<&'a EvaluationReport> {
        self.payloads().find_map(|p| match p {
            Payload::Evaluation(report) => Some(report),
            _ => None,
        })
    }

    pub fn reports(&self) -> impl Iterator<Item = &'a Report> + '_ {
        self.payloads().filter_map(|p| match p {
            Payload::Report(report) => Some(report),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentName, DomainName, Target};
    use crate::execution::result::SubResult;
    use crate::plan::Task;
    use crate::tracking::extraction::{extract_action_items, extract_risks};

    #[test]
    fn test_counts_and_flags_across_sub_results() {
        let task = Task::new(
            TaskId::new(1),
            Target::Domain(DomainName::TrackingExecution),
            "Extract action items and risks",
        );
        let result = TaskResult::delegated(
            &task,
            vec![
                SubResult::completed(
                    task.id.sub_id(0),
                    AgentName::ActionItemExtraction,
                    "Extract action items",
                    Payload::Extraction(ExtractionList::ActionItems(extract_action_items(
                        "Fix the build. Review the release notes.",
                    ))),
                ),
                SubResult::completed(
                    task.id.sub_id(1),
                    AgentName::RiskExtraction,
                    "Extract risks",
                    Payload::Extraction(ExtractionList::Risks(extract_risks("nothing"))),
                ),
            ],
        );
        let upstream = Upstream::new([&result]);
        assert_eq!(upstream.count(ExtractionKind::ActionItems), 2);
        assert_eq!(upstream.count(ExtractionKind::Risks), 1);
        assert_eq!(upstream.count(ExtractionKind::Decisions), 0);
        assert!(!upstream.gap_flags().is_empty());
        assert!(upstream.context().is_none());
    }

    #[test]
    fn test_answer_from_evaluation() {
        let task = Task::new(
            TaskId::new(6),
            Target::Agent(AgentName::Evaluation),
            "Evaluate",
        );
        let answer = Answer {
            narrative: "ok".to_string(),
            ..Default::default()
        };
        let result = TaskResult::completed(
            &task,
            Payload::Evaluation(EvaluationReport::from_criteria(vec![], Some(answer.clone()))),
        );
        let upstream = Upstream::new([&result]);
        assert_eq!(upstream.answer(), Some(&answer));
        assert!(upstream.evaluation().is_some());
    }

    #[test]
    fn test_empty() {
        let upstream = Upstream::empty();
        assert!(upstream.is_empty());
        assert!(upstream.answer().is_none());
    }
}
