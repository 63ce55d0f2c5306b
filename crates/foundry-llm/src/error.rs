use thiserror::Error;

/// Error reported by a chunk sink, forwarded as the source of [`LlmError::Callback`]
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while talking to an Azure AI Foundry deployment
///
/// Every variant raised by a call names the model that call targeted.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The client could not be built from its configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The transport failed or the endpoint answered with a non-success status
    #[error("chat completion failed for model '{model}': {message}")]
    Upstream {
        model: String,
        /// HTTP status, absent when the request never got a response
        status: Option<u16>,
        message: String,
    },

    /// The response stream broke off before it ended
    #[error("stream error for model '{model}': {message}")]
    Stream { model: String, message: String },

    /// The chunk sink reported a failure and the stream was aborted
    #[error("streaming callback error for model '{model}'")]
    Callback {
        model: String,
        #[source]
        source: SinkError,
    },

    /// Accumulated tool call arguments were not valid JSON
    #[error("failed to decode arguments of tool call '{tool}' for model '{model}'")]
    ToolCallDecode {
        model: String,
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    /// The call was cancelled through its cancellation token
    #[error("request for model '{model}' was cancelled")]
    Cancelled { model: String },

    /// An embedding request failed
    #[error("embedding failed for model '{model}': {message}")]
    Embedding { model: String, message: String },
}

impl LlmError {
    /// Model the failed call targeted, `None` for configuration errors
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Configuration(_) => None,
            Self::Upstream { model, .. }
            | Self::Stream { model, .. }
            | Self::Callback { model, .. }
            | Self::ToolCallDecode { model, .. }
            | Self::Cancelled { model }
            | Self::Embedding { model, .. } => Some(model),
        }
    }

    /// HTTP status returned by the endpoint, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn callback_error_keeps_sink_source() {
        let err = LlmError::Callback {
            model: "gpt-4o".to_owned(),
            source: "client went away".into(),
        };

        assert_eq!(err.to_string(), "streaming callback error for model 'gpt-4o'");
        assert_eq!(err.source().unwrap().to_string(), "client went away");
        assert_eq!(err.model(), Some("gpt-4o"));
    }

    #[test]
    fn status_only_on_upstream() {
        let upstream = LlmError::Upstream {
            model: "gpt-4o".to_owned(),
            status: Some(429),
            message: "too many requests".to_owned(),
        };
        let cancelled = LlmError::Cancelled {
            model: "gpt-4o".to_owned(),
        };

        assert_eq!(upstream.status(), Some(429));
        assert_eq!(cancelled.status(), None);
        assert_eq!(LlmError::Configuration("no credential".to_owned()).model(), None);
    }
}
