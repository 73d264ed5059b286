//! Reasoning backend port
//!
//! Defines the interface for the external natural-language reasoning
//! service. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use nion_domain::{InputMessage, ReasoningResult, SynthesisContext};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the reasoning backend.
///
/// None of these ever reach the caller of a reasoning strategy: every
/// failure is recovered by the rule-based fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate limited by backend")]
    RateLimited,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Backend returned an empty response")]
    EmptyResponse,
}

impl BackendError {
    /// Whether retrying the same call later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BackendError::Transport(_) | BackendError::RateLimited | BackendError::Timeout(_)
        )
    }
}

/// External reasoning service
#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Classify intent and urgency of a message
    async fn classify(&self, message: &InputMessage) -> Result<ReasoningResult, BackendError>;

    /// Produce free text for `prompt` given a context block
    async fn synthesize(
        &self,
        prompt: &str,
        context: &SynthesisContext,
    ) -> Result<String, BackendError>;
}
