//! Evaluation agent (cross-cutting)

use super::{Agent, AgentError, AgentInput};
use async_trait::async_trait;
use nion_domain::{AgentName, Answer, Criterion, CriterionResult, EvaluationReport, Payload};

const MAX_NARRATIVE_CHARS: usize = 2000;

/// Scores the upstream answer against a fixed rubric.
///
/// The verdict is APPROVED only when every criterion passes. Whether a
/// REJECTED verdict blocks delivery is decided by the executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationAgent;

impl EvaluationAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, answer: Option<&Answer>) -> EvaluationReport {
        let Some(answer) = answer else {
            let criteria = Criterion::ALL
                .into_iter()
                .map(|criterion| CriterionResult {
                    criterion,
                    passed: false,
                    note: "No response to evaluate".to_string(),
                })
                .collect();
            return EvaluationReport::from_criteria(criteria, None);
        };

        let criteria = Criterion::ALL
            .into_iter()
            .map(|criterion| {
                let (passed, note) = Self::check(criterion, answer);
                CriterionResult {
                    criterion,
                    passed,
                    note: note.to_string(),
                }
            })
            .collect();
        EvaluationReport::from_criteria(criteria, Some(answer.clone()))
    }

    fn check(criterion: Criterion, answer: &Answer) -> (bool, &'static str) {
        match criterion {
            Criterion::Relevance => {
                if answer.narrative.trim().is_empty() {
                    (false, "Response has no narrative")
                } else if answer.known.is_empty() && answer.logged.is_empty() {
                    (false, "Response references neither facts nor logged items")
                } else {
                    (true, "Response addresses the message")
                }
            }
            Criterion::Accuracy => {
                let claims_context = answer.known.iter().any(|line| line != Answer::NO_CONTEXT);
                if claims_context == answer.context_available {
                    (true, "Known facts match the retrieved context")
                } else {
                    (false, "Known facts do not match the retrieved context")
                }
            }
            Criterion::Tone => {
                let narrative = answer.narrative.trim();
                let letters: Vec<char> = narrative.chars().filter(|c| c.is_alphabetic()).collect();
                let shouting = letters.len() > 20 && letters.iter().all(|c| c.is_uppercase());
                if shouting || narrative.contains("!!") {
                    (false, "Response tone is not professional")
                } else if narrative.chars().count() > MAX_NARRATIVE_CHARS {
                    (false, "Response is too long")
                } else {
                    (true, "Professional tone")
                }
            }
            Criterion::GapsAcknowledged => {
                if answer.needed.is_empty() {
                    (false, "Response does not state what is still needed")
                } else {
                    (true, "Missing information is stated")
                }
            }
        }
    }
}

#[async_trait]
impl Agent for EvaluationAgent {
    fn name(&self) -> AgentName {
        AgentName::Evaluation
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        Ok(Payload::Evaluation(self.evaluate(input.upstream.answer())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nion_domain::Verdict;

    fn good_answer() -> Answer {
        Answer {
            known: vec!["Project: PRJ-ALPHA".to_string()],
            logged: vec!["1 action items logged".to_string()],
            needed: vec!["Owners for the logged items".to_string()],
            narrative: "Here is what I know so far.".to_string(),
            narrative_from_backend: false,
            context_available: true,
        }
    }

    #[test]
    fn test_good_answer_is_approved() {
        let report = EvaluationAgent::new().evaluate(Some(&good_answer()));
        assert_eq!(report.verdict, Verdict::Approved);
        assert_eq!(report.criteria.len(), 4);
        assert_eq!(report.answer, Some(good_answer()));
    }

    #[test]
    fn test_missing_gaps_is_rejected() {
        let answer = Answer {
            needed: vec![],
            ..good_answer()
        };
        let report = EvaluationAgent::new().evaluate(Some(&answer));
        assert!(report.is_rejected());
        let failed: Vec<Criterion> = report
            .criteria
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.criterion)
            .collect();
        assert_eq!(failed, vec![Criterion::GapsAcknowledged]);
    }

    #[test]
    fn test_inconsistent_context_fails_accuracy() {
        let answer = Answer {
            context_available: false,
            ..good_answer()
        };
        let report = EvaluationAgent::new().evaluate(Some(&answer));
        assert!(!report.criteria[1].passed);
    }

    #[test]
    fn test_shouting_fails_tone() {
        let answer = Answer {
            narrative: "THIS IS ABSOLUTELY UNACCEPTABLE AND WRONG".to_string(),
            ..good_answer()
        };
        assert!(EvaluationAgent::new().evaluate(Some(&answer)).is_rejected());
    }

    #[test]
    fn test_no_answer_is_rejected() {
        let report = EvaluationAgent::new().evaluate(None);
        assert!(report.is_rejected());
        assert!(report.answer.is_none());
    }
}
