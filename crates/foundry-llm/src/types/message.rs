use serde::{Deserialize, Serialize};

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// End-user input
    User,
    /// Model output, sent to the wire as `assistant`
    Model,
    /// Tool results fed back to the model
    Tool,
}

/// One piece of message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    /// Plain text
    Text(String),
    /// Tool invocation requested by the model
    ToolRequest(ToolRequest),
    /// Result of a tool invocation
    ToolResponse(ToolResponse),
    /// Image or other media reference
    Media(Media),
}

impl Part {
    /// Text content, if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::ToolRequest(_) | Self::ToolResponse(_) | Self::Media(_) => None,
        }
    }

    /// Tool request, if this is a tool request part
    pub const fn as_tool_request(&self) -> Option<&ToolRequest> {
        match self {
            Self::ToolRequest(request) => Some(request),
            _ => None,
        }
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Name of the tool to call
    pub name: String,
    /// Structured arguments
    pub input: serde_json::Value,
}

/// Output of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Name of the tool that produced the output
    pub name: String,
    /// Structured output
    pub output: serde_json::Value,
}

/// Media reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// URL or data URI
    pub url: String,
    /// MIME type, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A role-tagged sequence of parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message
    pub role: Role,
    /// Ordered content parts
    pub content: Vec<Part>,
}

impl Message {
    /// Message with the given role and parts
    pub const fn new(role: Role, content: Vec<Part>) -> Self {
        Self { role, content }
    }

    /// Single-part system message
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, vec![Part::Text(text.into())])
    }

    /// Single-part user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::Text(text.into())])
    }

    /// Single-part model message
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, vec![Part::Text(text.into())])
    }

    /// Concatenation of all text parts
    pub fn text(&self) -> String {
        self.content.iter().filter_map(Part::as_text).collect()
    }

    /// All tool requests in order
    pub fn tool_requests(&self) -> impl Iterator<Item = &ToolRequest> {
        self.content.iter().filter_map(Part::as_tool_request)
    }
}
