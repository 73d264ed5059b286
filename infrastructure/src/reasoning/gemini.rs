//! Gemini reasoning backend
//!
//! Implements [`ReasoningBackend`] against the Generative Language REST API
//! (`models/{model}:generateContent`). Classification asks for a JSON
//! object and parses it with [`parse_classification`]; synthesis returns
//! the first candidate's text.

use async_trait::async_trait;
use nion_application::ports::reasoning_backend::{BackendError, ReasoningBackend};
use nion_domain::{InputMessage, ReasoningResult, SynthesisContext, parse_classification};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` makes every call fail with a missing credential.
    pub api_key: Option<String>,
    /// Environment variable the key was read from, for diagnostics
    pub api_key_env: String,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    /// Transport-level timeout, independent of the strategy's call bound
    pub request_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: 0.2,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl GeminiConfig {
    /// Read the API key from `api_key_env`; blank values count as absent.
    pub fn from_env(api_key_env: impl Into<String>) -> Self {
        let api_key_env = api_key_env.into();
        let api_key = std::env::var(&api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            api_key_env,
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Gemini-backed reasoning backend
pub struct GeminiReasoningBackend {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiReasoningBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn classification_prompt(message: &InputMessage) -> String {
        format!(
            r#"Analyze this message and identify the primary intent.

Message: "{content}"
Sender Role: {role}
Source: {source}

Classify the intent as one of:
- status_query: Asking about current status or progress
- feasibility_query: Asking if something can be done
- decision_request: Requesting a decision or recommendation
- escalation: Urgent issue or escalation
- meeting_update: Meeting transcript or update
- general_request: General communication

Also identify whether the message has action items, risks, issues or
decisions, and its urgency (low/medium/high).

Respond ONLY with valid JSON in this exact format:
{{
  "intent": "intent_type",
  "has_action_items": true,
  "has_risks": false,
  "has_issues": false,
  "has_decisions": false,
  "urgency": "medium",
  "reasoning": "brief explanation"
}}"#,
            content = message.content(),
            role = message.sender().role,
            source = message.source(),
        )
    }

    fn synthesis_prompt(prompt: &str, context: &SynthesisContext) -> String {
        format!(
            "You are Nion, an AI program manager. {prompt}\n\n{block}\n\n\
             Write a professional, concise reply that acknowledges what is known, \
             states what has been logged and names what is still missing. \
             Plain text only, no JSON.",
            block = context.to_prompt_block(),
        )
    }

    fn request_body(&self, text: String) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        }
    }

    async fn generate(&self, text: String) -> Result<String, BackendError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| BackendError::MissingCredential(self.config.api_key_env.clone()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|_| BackendError::MissingCredential(self.config.api_key_env.clone()))?,
        );

        debug!(model = %self.config.model, "Calling Gemini generateContent");
        let response = self
            .client
            .post(self.url())
            .headers(headers)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(self.config.request_timeout)
                } else {
                    BackendError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Self::parse_response(status, &body)
    }

    /// Map an HTTP status and body to the first candidate's text.
    fn parse_response(status: StatusCode, body: &str) -> Result<String, BackendError> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(BackendError::RateLimited);
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(body)
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;
        if let Some(error) = parsed.error {
            return Err(BackendError::MalformedResponse(error.message));
        }

        let text: String = parsed
            .candidates
            .into_iter()
            .flatten()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl ReasoningBackend for GeminiReasoningBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn classify(&self, message: &InputMessage) -> Result<ReasoningResult, BackendError> {
        let text = self.generate(Self::classification_prompt(message)).await?;
        parse_classification(&text).map_err(|e| BackendError::MalformedResponse(e.to_string()))
    }

    async fn synthesize(
        &self,
        prompt: &str,
        context: &SynthesisContext,
    ) -> Result<String, BackendError> {
        self.generate(Self::synthesis_prompt(prompt, context)).await
    }
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nion_domain::{Intent, Sender, SourceChannel, Urgency};

    fn message() -> InputMessage {
        InputMessage::new(
            "MSG-001",
            SourceChannel::Chat,
            Sender::new("Sarah Chen", "Product Manager"),
            "Is the API ready?",
        )
    }

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key_env, "GOOGLE_API_KEY");
        assert!(!config.has_credential());
    }

    #[test]
    fn test_url_and_body() {
        let backend = GeminiReasoningBackend::new(
            GeminiConfig::default().with_endpoint("http://localhost:9/v1beta/"),
        )
        .unwrap();
        assert_eq!(
            backend.url(),
            "http://localhost:9/v1beta/models/gemini-2.0-flash:generateContent"
        );
        let body = serde_json::to_value(backend.request_body("hi".to_string())).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["contents"][0]["role"], "user");
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_prompt_carries_message_fields() {
        let prompt = GeminiReasoningBackend::classification_prompt(&message());
        assert!(prompt.contains("Message: \"Is the API ready?\""));
        assert!(prompt.contains("Sender Role: Product Manager"));
        assert!(prompt.contains("Source: chat"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let backend = GeminiReasoningBackend::new(GeminiConfig::default()).unwrap();
        assert_eq!(
            backend.classify(&message()).await,
            Err(BackendError::MissingCredential("GOOGLE_API_KEY".to_string()))
        );
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"```json\n{\"intent\":\"status_query\",\"urgency\":\"low\"}\n```"}]}}]}"#;
        let text = GeminiReasoningBackend::parse_response(StatusCode::OK, body).unwrap();
        let result = parse_classification(&text).unwrap();
        assert_eq!(result.intent, Intent::StatusQuery);
        assert_eq!(result.urgency, Urgency::Low);
        assert!(result.from_backend);
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(
            GeminiReasoningBackend::parse_response(StatusCode::TOO_MANY_REQUESTS, ""),
            Err(BackendError::RateLimited)
        );
        assert!(matches!(
            GeminiReasoningBackend::parse_response(StatusCode::FORBIDDEN, "denied"),
            Err(BackendError::Status { status: 403, .. })
        ));
        assert!(matches!(
            GeminiReasoningBackend::parse_response(StatusCode::OK, "not json"),
            Err(BackendError::MalformedResponse(_))
        ));
        assert_eq!(
            GeminiReasoningBackend::parse_response(StatusCode::OK, r#"{"candidates":[]}"#),
            Err(BackendError::EmptyResponse)
        );
    }
}
