//! Inbound message entities

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Channel a message arrived on.
///
/// Unknown channel labels are kept verbatim in [`SourceChannel::Other`] so
/// replies can be delivered back on the same channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceChannel {
    Chat,
    Email,
    Meeting,
    Other(String),
}

impl SourceChannel {
    pub fn as_str(&self) -> &str {
        match self {
            SourceChannel::Chat => "chat",
            SourceChannel::Email => "email",
            SourceChannel::Meeting => "meeting",
            SourceChannel::Other(label) => label,
        }
    }
}

impl std::fmt::Display for SourceChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SourceChannel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "chat" => SourceChannel::Chat,
            "email" => SourceChannel::Email,
            "meeting" => SourceChannel::Meeting,
            _ => SourceChannel::Other(s.trim().to_string()),
        })
    }
}

impl Serialize for SourceChannel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceChannel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(channel) = s.parse();
        Ok(channel)
    }
}

/// Who sent the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub role: String,
}

impl Sender {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// A single inbound message (Entity)
///
/// Fields are private: a message is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    message_id: String,
    source: SourceChannel,
    sender: Sender,
    content: String,
    #[serde(default)]
    project: Option<String>,
}

impl InputMessage {
    pub fn new(
        message_id: impl Into<String>,
        source: SourceChannel,
        sender: Sender,
        content: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            source,
            sender,
            content: content.into(),
            project: None,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        let project = project.into();
        self.project = if project.trim().is_empty() {
            None
        } else {
            Some(project)
        };
        self
    }

    /// Parse a message from its JSON wire form and validate it.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let message: InputMessage = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidMessage(e.to_string()))?;
        message.validate()?;
        Ok(message)
    }

    /// A message needs an identifier; everything else may be sparse.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.message_id.trim().is_empty() {
            return Err(DomainError::InvalidMessage(
                "message_id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.message_id
    }

    pub fn source(&self) -> &SourceChannel {
        &self.source
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Project identifier, with blank values treated as absent
    pub fn project(&self) -> Option<&str> {
        self.project
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
