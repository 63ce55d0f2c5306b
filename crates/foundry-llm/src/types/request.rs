use serde::{Deserialize, Serialize};

use super::message::Message;
use super::tool::ToolDefinition;

/// A chat request against one model deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// Deployment name
    pub model: String,
    /// Conversation so far
    pub messages: Vec<Message>,
    /// Tools the model may call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    /// Untyped sampling options, see [`super::SamplingConfig::from_value`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ModelRequest {
    /// Request with messages only
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
            config: None,
        }
    }

    /// Attach tool definitions
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Attach a sampling config bag
    #[must_use]
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}
