//! Typed view over the untyped sampling config bag
//!
//! Extraction is best effort: a missing key, a value of the wrong JSON type
//! or an unknown literal leaves the field unset. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool selection policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Leave the decision to the provider default
    #[default]
    Unset,
    /// Model decides whether to call tools
    Auto,
    /// Model must call at least one tool
    Required,
    /// Model must not call tools
    None,
}

impl ToolChoice {
    /// Wire literal, `None` for [`ToolChoice::Unset`]
    pub const fn as_wire(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Auto => Some("auto"),
            Self::Required => Some("required"),
            Self::None => Some("none"),
        }
    }

    fn parse(literal: &str) -> Self {
        match literal {
            "auto" => Self::Auto,
            "required" => Self::Required,
            "none" => Self::None,
            other => {
                tracing::debug!(tool_choice = other, "ignoring unrecognized tool choice");
                Self::Unset
            }
        }
    }
}

/// Sampling parameters recognized in a request config
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// `maxOutputTokens`
    pub max_output_tokens: Option<u32>,
    /// `temperature`
    pub temperature: Option<f64>,
    /// `topP`
    pub top_p: Option<f64>,
    /// `toolChoice`
    pub tool_choice: ToolChoice,
}

impl SamplingConfig {
    /// Extract sampling parameters from an untyped config value
    ///
    /// Never fails. Anything other than a JSON object yields the default.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(map) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        Self {
            max_output_tokens: map
                .get("maxOutputTokens")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok()),
            temperature: map.get("temperature").and_then(Value::as_f64),
            top_p: map.get("topP").and_then(Value::as_f64),
            tool_choice: map
                .get("toolChoice")
                .and_then(Value::as_str)
                .map_or(ToolChoice::Unset, ToolChoice::parse),
        }
    }
}
