use super::messages::translate_messages;
use crate::protocol::openai::{ChatCompletionRequest, WireFunction, WireTool, function_type};
use crate::types::{ModelRequest, SamplingConfig, ToolDefinition};

/// Build the wire request for a model request
///
/// `tool_choice` is only sent alongside at least one tool and only when the
/// config names a recognized policy. The `stream` flag is left unset.
pub fn build_request(request: &ModelRequest) -> ChatCompletionRequest {
    let sampling = SamplingConfig::from_value(request.config.as_ref());

    let tools = (!request.tools.is_empty()).then(|| request.tools.iter().map(WireTool::from).collect::<Vec<_>>());

    let tool_choice = tools
        .as_ref()
        .and(sampling.tool_choice.as_wire())
        .map(str::to_owned);

    ChatCompletionRequest {
        model: request.model.clone(),
        messages: translate_messages(&request.messages),
        max_tokens: sampling.max_output_tokens,
        temperature: sampling.temperature,
        top_p: sampling.top_p,
        tools,
        tool_choice,
        stream: None,
    }
}

impl From<&ModelRequest> for ChatCompletionRequest {
    fn from(request: &ModelRequest) -> Self {
        build_request(request)
    }
}

impl From<&ToolDefinition> for WireTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            tool_type: function_type(),
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Message;

    fn weather_tool() -> ToolDefinition {
        ToolDefinition::new("get_weather")
            .with_description("Current weather for a city")
            .with_input_schema(json!({
                "type": "object",
                "properties": { "city": { "type": "string" } },
                "required": ["city"],
            }))
    }

    #[test]
    fn plain_request_serializes_minimally() {
        let request = ModelRequest::new("gpt-4o", vec![Message::user("hi")]);

        assert_eq!(
            serde_json::to_value(build_request(&request)).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [{ "role": "user", "content": "hi" }],
            })
        );
    }

    #[test]
    fn sampling_config_is_applied() {
        let request = ModelRequest::new("gpt-4o", vec![Message::user("hi")]).with_config(json!({
            "maxOutputTokens": 100,
            "temperature": 0.5,
            "topP": 0.8,
        }));

        let wire = build_request(&request);

        assert_eq!(wire.max_tokens, Some(100));
        assert_eq!(wire.temperature, Some(0.5));
        assert_eq!(wire.top_p, Some(0.8));
    }

    #[test]
    fn tools_carry_description_and_schema() {
        let request = ModelRequest::new("gpt-4o", vec![Message::user("weather?")])
            .with_tools(vec![weather_tool(), ToolDefinition::new("get_time")])
            .with_config(json!({ "toolChoice": "required" }));

        let wire = serde_json::to_value(build_request(&request)).unwrap();

        assert_eq!(wire["tool_choice"], "required");
        assert_eq!(wire["tools"][0]["type"], "function");
        assert_eq!(wire["tools"][0]["function"]["name"], "get_weather");
        assert_eq!(wire["tools"][0]["function"]["description"], "Current weather for a city");
        assert_eq!(wire["tools"][0]["function"]["parameters"]["required"], json!(["city"]));
        assert_eq!(wire["tools"][1], json!({ "type": "function", "function": { "name": "get_time" } }));
    }

    #[test]
    fn tool_choice_requires_tools() {
        let request = ModelRequest::new("gpt-4o", vec![Message::user("hi")]).with_config(json!({ "toolChoice": "auto" }));

        let wire = build_request(&request);

        assert!(wire.tools.is_none());
        assert!(wire.tool_choice.is_none());
    }

    #[test]
    fn unrecognized_tool_choice_is_omitted() {
        let request = ModelRequest::new("gpt-4o", vec![Message::user("hi")])
            .with_tools(vec![weather_tool()])
            .with_config(json!({ "toolChoice": "sometimes" }));

        let wire = build_request(&request);

        assert!(wire.tools.is_some());
        assert!(wire.tool_choice.is_none());
    }

    #[test]
    fn from_impl_matches_builder() {
        let request = ModelRequest::new("gpt-4o", vec![Message::system("s"), Message::user("u")]);
        assert_eq!(ChatCompletionRequest::from(&request), build_request(&request));
    }
}
