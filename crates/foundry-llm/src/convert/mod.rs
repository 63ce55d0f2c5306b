//! Translation between the provider-agnostic types and the wire format
//!
//! Outbound: [`request::build_request`] composes [`messages::translate_messages`]
//! with the sampling config and tool definitions. Inbound: complete responses go
//! through [`response::assemble_response`], streamed deltas through
//! [`stream::StreamAccumulator`].

pub mod embed;
pub mod finish_reason;
pub mod messages;
pub mod request;
pub mod response;
pub mod stream;

/// Correlation id for a tool call, derived from the tool name
pub fn tool_call_id(name: &str) -> String {
    format!("call_{name}")
}

/// Parse an accumulated streamed argument buffer, treating blank input as an empty object
pub(crate) fn decode_arguments(arguments: &str) -> Result<serde_json::Value, serde_json::Error> {
    if arguments.trim().is_empty() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }

    serde_json::from_str(arguments)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn call_id_is_prefixed_name() {
        assert_eq!(tool_call_id("get_weather"), "call_get_weather");
    }

    #[test]
    fn blank_arguments_decode_to_empty_object() {
        assert_eq!(decode_arguments("").unwrap(), json!({}));
        assert_eq!(decode_arguments("  ").unwrap(), json!({}));
        assert!(decode_arguments("{\"a\":").is_err());
    }
}
