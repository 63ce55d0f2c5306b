//! Chat completion and embedding wire types

use serde::{Deserialize, Serialize};

// -- Request types --

/// Chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Deployment name
    pub model: String,
    /// Conversation messages
    pub messages: Vec<WireMessage>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    /// `auto`, `required` or `none`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    /// Whether to stream the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Message in a chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum WireMessage {
    /// System instruction
    System {
        /// Instruction text
        content: String,
    },
    /// User input
    User {
        /// Input text
        content: String,
    },
    /// Earlier assistant turn
    Assistant {
        /// Text content
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        /// Tool calls made in that turn
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<WireToolCall>>,
    },
    /// Tool result
    Tool {
        /// Serialized output
        content: String,
        /// Call this result answers
        tool_call_id: String,
    },
}

/// Tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTool {
    /// Always `function`
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: WireFunction,
}

/// Function specification within a tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Complete tool call in a request or response message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    /// Correlation identifier
    #[serde(default)]
    pub id: String,
    /// Tool type, `function` for calls this layer understands
    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,
    /// Function name and arguments
    pub function: WireFunctionCall,
}

/// Function call details within a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded arguments
    #[serde(default)]
    pub arguments: String,
}

/// `function`, the only tool type in use
pub fn function_type() -> String {
    "function".to_owned()
}

// -- Response types --

/// Complete chat completion response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Model that served the request
    #[serde(default)]
    pub model: String,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<WireUsage>,
}

/// Choice within a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: ChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within a response choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

/// Token usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

// -- Streaming types --

/// One server-sent streaming delta
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    /// Chunk identifier
    #[serde(default)]
    pub id: String,
    /// Delta choices, empty on usage-only or filter-result chunks
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    /// Usage, sent by some deployments on the final chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<WireUsage>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Incremental delta
    #[serde(default)]
    pub delta: ChunkDelta,
    /// Finish reason on the final chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Incremental content within a streaming choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    /// Role, first chunk only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Text fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool call fragments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

/// Fragment of one tool call, keyed by its position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallDelta {
    /// Position in the `tool_calls` array
    #[serde(default)]
    pub index: u32,
    /// Correlation identifier, usually on the first fragment only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tool type, first fragment only
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub tool_type: Option<String>,
    /// Partial function call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionCallDelta>,
}

/// Partial function call within a tool call fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallDelta {
    /// Function name, not repeated on every fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Argument text to append
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

// -- Embedding types --

/// Embedding request for one input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Deployment name
    pub model: String,
    /// Text to embed
    pub input: String,
}

/// Embedding response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Returned vectors
    #[serde(default)]
    pub data: Vec<EmbeddingData>,
    /// Model that served the request
    #[serde(default)]
    pub model: String,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<EmbeddingUsage>,
}

/// One embedding vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// Vector components
    pub embedding: Vec<f64>,
    /// Position of the input
    #[serde(default)]
    pub index: u32,
}

/// Token usage of an embedding call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

// -- Error response --

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error message
    pub message: String,
    /// Error code
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn messages_are_tagged_by_role() {
        let messages = vec![
            WireMessage::System {
                content: "be brief".to_owned(),
            },
            WireMessage::Assistant {
                content: Some(String::new()),
                tool_calls: Some(vec![WireToolCall {
                    id: "call_lookup".to_owned(),
                    tool_type: function_type(),
                    function: WireFunctionCall {
                        name: "lookup".to_owned(),
                        arguments: "{}".to_owned(),
                    },
                }]),
            },
            WireMessage::Tool {
                content: "42".to_owned(),
                tool_call_id: "call_lookup".to_owned(),
            },
        ];

        assert_eq!(
            serde_json::to_value(&messages).unwrap(),
            json!([
                { "role": "system", "content": "be brief" },
                {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{
                        "id": "call_lookup",
                        "type": "function",
                        "function": { "name": "lookup", "arguments": "{}" }
                    }]
                },
                { "role": "tool", "content": "42", "tool_call_id": "call_lookup" }
            ])
        );
    }

    #[test]
    fn chunk_with_only_usage_parses() {
        let chunk: ChatCompletionChunk = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [],
            "usage": { "prompt_tokens": 3, "completion_tokens": 5, "total_tokens": 8 }
        }))
        .unwrap();

        assert!(chunk.choices.is_empty());
        assert_eq!(chunk.usage.unwrap().total_tokens, 8);
    }

    #[test]
    fn tool_call_delta_without_function_parses() {
        let chunk: ChatCompletionChunk = serde_json::from_value(json!({
            "choices": [{ "index": 0, "delta": { "tool_calls": [{ "index": 2, "id": "call_x" }] } }]
        }))
        .unwrap();

        let delta = &chunk.choices[0].delta.tool_calls.as_ref().unwrap()[0];
        assert_eq!(delta.index, 2);
        assert_eq!(delta.id.as_deref(), Some("call_x"));
        assert!(delta.function.is_none());
    }
}
