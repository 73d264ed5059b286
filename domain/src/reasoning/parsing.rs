//! Parsing of classification responses from the external reasoning backend.
//!
//! The backend is asked for a JSON object; models often wrap it in a
//! ```json fence or add prose around it, so the parser looks for the
//! fenced block first, then for the outermost `{...}` span.

use super::value_objects::{Intent, ReasoningResult, Signals, Urgency};
use crate::core::error::DomainError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawClassification {
    intent: Option<String>,
    urgency: Option<String>,
    reasoning: Option<String>,
    #[serde(default)]
    has_action_items: bool,
    #[serde(default)]
    has_risks: bool,
    #[serde(default)]
    has_issues: bool,
    #[serde(default)]
    has_decisions: bool,
}

/// Parse a backend classification into a [`ReasoningResult`].
///
/// Unknown intent labels map to `general_request` and unknown urgency to
/// `medium`. Only a response with no parsable JSON object is an error.
pub fn parse_classification(response: &str) -> Result<ReasoningResult, DomainError> {
    let json = extract_json_object(response).ok_or_else(|| {
        DomainError::MalformedResponse("no JSON object in classification response".to_string())
    })?;

    let raw: RawClassification = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedResponse(e.to_string()))?;

    let intent = raw
        .intent
        .as_deref()
        .map(Intent::parse_lenient)
        .unwrap_or(Intent::GeneralRequest);
    let urgency = raw
        .urgency
        .as_deref()
        .map(Urgency::parse_lenient)
        .unwrap_or(Urgency::Medium);

    let mut result = ReasoningResult::new(intent, urgency)
        .with_signals(Signals {
            has_action_items: raw.has_action_items,
            has_risks: raw.has_risks,
            has_issues: raw.has_issues,
            has_decisions: raw.has_decisions,
        })
        .from_backend();
    if let Some(reasoning) = raw.reasoning.filter(|r| !r.trim().is_empty()) {
        result = result.with_rationale(reasoning);
    }
    Ok(result)
}

fn extract_json_object(response: &str) -> Option<&str> {
    if let Some(start) = response.find("```json") {
        let body = &response[start + "```json".len()..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim());
        }
    }
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}
