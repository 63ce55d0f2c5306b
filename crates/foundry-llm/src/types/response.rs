use serde::{Deserialize, Serialize};

use super::message::{Message, Part, Role};

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end or a tool call
    Stop,
    /// Token limit reached
    Length,
    /// Content filter intervened
    Blocked,
    /// Any other provider reason
    Other,
    /// The response had no choices
    Unknown,
}

/// Token counters, all zero when the provider reported none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: u32,
    /// Generated tokens
    pub output_tokens: u32,
    /// Sum reported by the provider
    pub total_tokens: u32,
}

/// Assembled model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Generated message, role is always [`Role::Model`]
    pub message: Message,
    /// Why generation stopped
    pub finish_reason: FinishReason,
    /// Token counters
    pub usage: Usage,
}

impl ModelResponse {
    /// Response with the given parts
    pub const fn new(content: Vec<Part>, finish_reason: FinishReason, usage: Usage) -> Self {
        Self {
            message: Message::new(Role::Model, content),
            finish_reason,
            usage,
        }
    }

    /// Concatenated text of the generated message
    pub fn text(&self) -> String {
        self.message.text()
    }
}

/// Incremental output forwarded to a sink while streaming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponseChunk {
    /// Parts carried by this chunk
    pub content: Vec<Part>,
}

impl ModelResponseChunk {
    /// Chunk holding one text fragment
    pub fn text(fragment: impl Into<String>) -> Self {
        Self {
            content: vec![Part::Text(fragment.into())],
        }
    }

    /// Concatenated text of this chunk
    pub fn text_content(&self) -> String {
        self.content.iter().filter_map(Part::as_text).collect()
    }
}
