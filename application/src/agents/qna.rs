//! QnA agent: gap-aware three-part answers

use super::{Agent, AgentError, AgentInput};
use crate::reasoning::ReasoningStrategy;
use async_trait::async_trait;
use nion_domain::{AgentName, Answer, ExtractionKind, Intent, Payload, SynthesisContext};
use std::sync::Arc;

/// Fact lines carried into the "known" section
const KNOWN_LIMIT: usize = 4;

const STANDARD_NEEDS: [&str; 2] = [
    "Additional context from relevant stakeholders",
    "Clarification on specific requirements or constraints",
];

/// Composes a fixed-shape answer (known / logged / needed) from upstream
/// results, with a narrative from the reasoning strategy.
///
/// Sparse upstream results still produce every section.
pub struct QnaAgent {
    strategy: Arc<dyn ReasoningStrategy>,
}

impl QnaAgent {
    pub fn new(strategy: Arc<dyn ReasoningStrategy>) -> Self {
        Self { strategy }
    }

    fn prompt(intent: Intent) -> &'static str {
        match intent {
            Intent::StatusQuery => {
                "Answer the status question using only the known facts and logged items."
            }
            Intent::FeasibilityQuery | Intent::DecisionRequest => {
                "Give a gap-aware answer: state what is known, what has been logged, and what is still needed before committing."
            }
            Intent::Escalation => {
                "Acknowledge the escalation, summarize the logged issues and risks, and outline immediate next steps."
            }
            Intent::MeetingUpdate | Intent::GeneralRequest => {
                "Acknowledge the message briefly and mention anything that was logged."
            }
        }
    }
}

#[async_trait]
impl Agent for QnaAgent {
    fn name(&self) -> AgentName {
        AgentName::Qna
    }

    async fn execute(&self, input: &AgentInput<'_>) -> Result<Payload, AgentError> {
        let upstream = &input.upstream;
        let context = upstream.context();
        let context_available = context.is_some_and(|c| c.is_available());

        let known: Vec<String> = match context {
            Some(snapshot) if snapshot.is_available() => {
                snapshot.lines().into_iter().take(KNOWN_LIMIT).collect()
            }
            _ => vec![Answer::NO_CONTEXT.to_string()],
        };

        let logged: Vec<String> = ExtractionKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let count = upstream.count(kind);
                (count > 0).then(|| kind.logged_line(count))
            })
            .collect();

        let needed: Vec<String> = upstream
            .gap_flags()
            .iter()
            .map(|flag| flag.needed_line().to_string())
            .chain(STANDARD_NEEDS.iter().map(|line| line.to_string()))
            .collect();

        let synthesis_context = SynthesisContext {
            message: input.message.content().to_string(),
            sender_role: input.message.sender().role.clone(),
            known: if context_available {
                known.clone()
            } else {
                Vec::new()
            },
            logged: logged.clone(),
            needed: needed.clone(),
        };
        let synthesis = self
            .strategy
            .synthesize(Self::prompt(input.reasoning.intent), &synthesis_context)
            .await;

        Ok(Payload::Response(Answer {
            known,
            logged,
            needed,
            narrative: synthesis.text,
            narrative_from_backend: synthesis.from_backend,
            context_available,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support::message;
    use crate::reasoning::RuleBasedReasoning;
    use nion_domain::{
        AgentName as Name, ContextSnapshot, DomainName, ProjectFacts, ReasoningResult,
        SubResult, Target, Task, TaskId, TaskResult, UnavailableReason, Upstream, Urgency,
        extract,
    };

    fn agent() -> QnaAgent {
        QnaAgent::new(Arc::new(RuleBasedReasoning::new()))
    }

    fn knowledge_result(snapshot: ContextSnapshot) -> TaskResult {
        let task = Task::new(
            TaskId::new(1),
            Target::Agent(Name::KnowledgeRetrieval),
            "Retrieve",
        );
        TaskResult::completed(&task, Payload::Context(snapshot))
    }

    fn tracking_result(text: &str) -> TaskResult {
        let task = Task::new(
            TaskId::new(2),
            Target::Domain(DomainName::TrackingExecution),
            "Extract action items",
        );
        TaskResult::delegated(
            &task,
            vec![SubResult::completed(
                task.id.sub_id(0),
                Name::ActionItemExtraction,
                "Extract action items",
                Payload::Extraction(extract(ExtractionKind::ActionItems, text)),
            )],
        )
    }

    fn alpha() -> ContextSnapshot {
        ContextSnapshot::Available {
            project: "PRJ-ALPHA".to_string(),
            facts: ProjectFacts {
                release_date: "Dec 15, 2025".to_string(),
                code_freeze: "Dec 10, 2025".to_string(),
                days_remaining: 9,
                progress_percent: 70,
                capacity_percent: 85,
                engineering_manager: "Alex Kim".to_string(),
                tech_lead: "David Park".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_answer_with_context_and_items() {
        let msg = message("What's the status of the authentication feature?", Some("PRJ-ALPHA"));
        let reasoning = ReasoningResult::new(Intent::StatusQuery, Urgency::Medium);
        let knowledge = knowledge_result(alpha());
        let tracking = tracking_result(msg.content());
        let input = AgentInput::new(&msg, &reasoning, Upstream::new([&knowledge, &tracking]));

        let Payload::Response(answer) = agent().execute(&input).await.unwrap() else {
            panic!("expected a response payload");
        };
        assert!(answer.context_available);
        assert_eq!(answer.known.len(), 4);
        assert!(answer.known.contains(&"Current Release Date: Dec 15, 2025".to_string()));
        assert_eq!(answer.logged, vec!["1 action items logged".to_string()]);
        assert!(answer.needed.contains(&"Owners for the logged items".to_string()));
        assert!(answer.needed.contains(&STANDARD_NEEDS[0].to_string()));
        assert!(!answer.narrative.is_empty());
        assert!(!answer.narrative_from_backend);
    }

    #[tokio::test]
    async fn test_answer_without_context_keeps_shape() {
        let msg = message("Can we ship?", None);
        let reasoning = ReasoningResult::new(Intent::FeasibilityQuery, Urgency::Medium);
        let knowledge = knowledge_result(ContextSnapshot::Unavailable {
            reason: UnavailableReason::NoProject,
        });
        let input = AgentInput::new(&msg, &reasoning, Upstream::new([&knowledge]));

        let Payload::Response(answer) = agent().execute(&input).await.unwrap() else {
            panic!("expected a response payload");
        };
        assert!(!answer.context_available);
        assert_eq!(answer.known, vec![Answer::NO_CONTEXT.to_string()]);
        assert!(answer.logged.is_empty());
        assert_eq!(answer.needed.len(), STANDARD_NEEDS.len());
        assert_eq!(answer.narrative, "Message acknowledged and processed.");
    }

    #[tokio::test]
    async fn test_answer_with_no_upstream() {
        let msg = message("hello", None);
        let reasoning = ReasoningResult::new(Intent::GeneralRequest, Urgency::Low);
        let input = AgentInput::new(&msg, &reasoning, Upstream::empty());
        let payload = agent().execute(&input).await.unwrap();
        assert!(matches!(payload, Payload::Response(_)));
    }
}
