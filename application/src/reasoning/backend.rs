//! Backend-backed reasoning with per-call rule-based fallback

use super::strategy::{ReasoningStrategy, RuleBasedReasoning, Synthesis};
use crate::ports::reasoning_backend::{BackendError, ReasoningBackend};
use async_trait::async_trait;
use nion_domain::{InputMessage, ReasoningResult, SynthesisContext};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Calls the external backend, bounded by a timeout.
///
/// Any failure (missing credential, transport, HTTP status, rate limit,
/// malformed or empty response, timeout) is logged and answered by
/// [`RuleBasedReasoning`] for that call only. The caller never sees an error.
pub struct BackendReasoning {
    backend: Arc<dyn ReasoningBackend>,
    rules: RuleBasedReasoning,
    timeout: Duration,
    fallbacks: AtomicUsize,
}

impl BackendReasoning {
    pub fn new(backend: Arc<dyn ReasoningBackend>) -> Self {
        Self {
            backend,
            rules: RuleBasedReasoning::new(),
            timeout: Duration::from_secs(20),
            fallbacks: AtomicUsize::new(0),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, BackendError>>,
    ) -> Result<T, BackendError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(self.timeout)),
        }
    }

    fn record_fallback(&self, operation: &str, error: &BackendError) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
        warn!(
            backend = %self.backend.name(),
            operation,
            error = %error,
            transient = error.is_transient(),
            "Reasoning backend failed, falling back to rules"
        );
    }
}

#[async_trait]
impl ReasoningStrategy for BackendReasoning {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn classify(&self, message: &InputMessage) -> ReasoningResult {
        match self.bounded(self.backend.classify(message)).await {
            Ok(result) => {
                debug!(intent = %result.intent, urgency = %result.urgency, "Backend classification");
                result.from_backend()
            }
            Err(error) => {
                self.record_fallback("classify", &error);
                self.rules.classify_now(message)
            }
        }
    }

    async fn synthesize(&self, prompt: &str, context: &SynthesisContext) -> Synthesis {
        let outcome = match self.bounded(self.backend.synthesize(prompt, context)).await {
            Ok(text) if text.trim().is_empty() => Err(BackendError::EmptyResponse),
            other => other,
        };
        match outcome {
            Ok(text) => Synthesis {
                text: text.trim().to_string(),
                from_backend: true,
            },
            Err(error) => {
                self.record_fallback("synthesize", &error);
                self.rules.synthesize_now(prompt, context)
            }
        }
    }

    fn fallback_count(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nion_domain::{Intent, Sender, SourceChannel, Urgency, classify_by_rules};

    /// Backend that always fails with a fixed error
    struct FailingBackend(BackendError);

    #[async_trait]
    impl ReasoningBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        async fn classify(&self, _message: &InputMessage) -> Result<ReasoningResult, BackendError> {
            Err(self.0.clone())
        }

        async fn synthesize(
            &self,
            _prompt: &str,
            _context: &SynthesisContext,
        ) -> Result<String, BackendError> {
            Err(self.0.clone())
        }
    }

    /// Backend that answers with canned values
    struct CannedBackend {
        synthesis: String,
    }

    #[async_trait]
    impl ReasoningBackend for CannedBackend {
        fn name(&self) -> &str {
            "canned"
        }

        async fn classify(&self, _message: &InputMessage) -> Result<ReasoningResult, BackendError> {
            Ok(ReasoningResult::new(Intent::Escalation, Urgency::High).with_rationale("canned"))
        }

        async fn synthesize(
            &self,
            _prompt: &str,
            _context: &SynthesisContext,
        ) -> Result<String, BackendError> {
            Ok(self.synthesis.clone())
        }
    }

    /// Backend that never answers
    struct HangingBackend;

    #[async_trait]
    impl ReasoningBackend for HangingBackend {
        fn name(&self) -> &str {
            "hanging"
        }

        async fn classify(&self, _message: &InputMessage) -> Result<ReasoningResult, BackendError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(BackendError::EmptyResponse)
        }

        async fn synthesize(
            &self,
            _prompt: &str,
            _context: &SynthesisContext,
        ) -> Result<String, BackendError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(BackendError::EmptyResponse)
        }
    }

    fn corpus() -> Vec<InputMessage> {
        [
            "What's the status of the authentication feature?",
            "Can we add SSO integration before the December release?",
            "Should we prioritize mobile or web?",
            "The client is threatening legal action!",
            "Meeting transcript: Alex: demo went fine",
            "Thanks, noted.",
            "",
        ]
        .into_iter()
        .enumerate()
        .map(|(i, content)| {
            InputMessage::new(
                format!("MSG-{i}"),
                SourceChannel::Chat,
                Sender::new("Sam", "Engineer"),
                content,
            )
        })
        .collect()
    }

    #[tokio::test]
    async fn test_fallback_equals_rules_for_every_failure_kind() {
        let failures = [
            BackendError::MissingCredential("GOOGLE_API_KEY".to_string()),
            BackendError::Transport("connection refused".to_string()),
            BackendError::Status {
                status: 500,
                body: "oops".to_string(),
            },
            BackendError::RateLimited,
            BackendError::MalformedResponse("not json".to_string()),
        ];
        for failure in failures {
            let strategy = BackendReasoning::new(Arc::new(FailingBackend(failure)));
            for message in corpus() {
                let result = strategy.classify(&message).await;
                assert_eq!(result, classify_by_rules(&message));
                assert!(!result.from_backend);
            }
            assert_eq!(strategy.fallback_count(), corpus().len());
        }
    }

    #[tokio::test]
    async fn test_backend_result_is_flagged() {
        let strategy = BackendReasoning::new(Arc::new(CannedBackend {
            synthesis: "  All good.  ".to_string(),
        }));
        let messages = corpus();
        let message = &messages[5];
        let result = strategy.classify(message).await;
        assert_eq!(result.intent, Intent::Escalation);
        assert!(result.from_backend);

        let synthesis = strategy
            .synthesize("prompt", &SynthesisContext::default())
            .await;
        assert_eq!(synthesis.text, "All good.");
        assert!(synthesis.from_backend);
        assert_eq!(strategy.fallback_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_synthesis_falls_back() {
        let strategy = BackendReasoning::new(Arc::new(CannedBackend {
            synthesis: "   ".to_string(),
        }));
        let synthesis = strategy
            .synthesize("prompt", &SynthesisContext::default())
            .await;
        assert!(!synthesis.from_backend);
        assert_eq!(synthesis.text, "Message acknowledged and processed.");
        assert_eq!(strategy.fallback_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let strategy =
            BackendReasoning::new(Arc::new(HangingBackend)).with_timeout(Duration::from_secs(5));
        let messages = corpus();
        let message = &messages[0];
        let result = strategy.classify(message).await;
        assert_eq!(result, classify_by_rules(message));
        let synthesis = strategy
            .synthesize("prompt", &SynthesisContext::default())
            .await;
        assert!(!synthesis.from_backend);
        assert_eq!(strategy.fallback_count(), 2);
    }
}
