use super::finish_reason::map_finish_reason;
use crate::protocol::openai::{ChatCompletion, WireToolCall, WireUsage};
use crate::types::{FinishReason, ModelResponse, Part, ToolRequest, Usage};

/// Assemble a complete wire response into a [`ModelResponse`]
///
/// Only the first choice is read. A response without choices yields an
/// empty message with [`FinishReason::Unknown`]. Tool calls whose arguments
/// do not parse, blank ones included, are dropped and the rest of the response
/// is kept.
pub fn assemble_response(completion: ChatCompletion) -> ModelResponse {
    let usage = completion.usage.map(Usage::from).unwrap_or_default();

    let Some(choice) = completion.choices.into_iter().next() else {
        tracing::debug!(id = %completion.id, "response carried no choices");
        return ModelResponse::new(Vec::new(), FinishReason::Unknown, usage);
    };

    let mut content = Vec::new();

    if let Some(text) = choice.message.content.filter(|text| !text.is_empty()) {
        content.push(Part::Text(text));
    }

    content.extend(
        choice
            .message
            .tool_calls
            .into_iter()
            .flatten()
            .filter_map(tool_request)
            .map(Part::ToolRequest),
    );

    let finish_reason = map_finish_reason(choice.finish_reason.as_deref().unwrap_or_default());

    ModelResponse::new(content, finish_reason, usage)
}

fn tool_request(call: WireToolCall) -> Option<ToolRequest> {
    if call.tool_type != "function" || call.id.is_empty() {
        tracing::debug!(tool_type = %call.tool_type, id = %call.id, "skipping tool call");
        return None;
    }

    match serde_json::from_str(&call.function.arguments) {
        Ok(input) => Some(ToolRequest {
            name: call.function.name,
            input,
        }),
        Err(e) => {
            tracing::warn!(tool = %call.function.name, error = %e, "dropping tool call with malformed arguments");
            None
        }
    }
}

/// Counters are copied only when the prompt count is positive
impl From<WireUsage> for Usage {
    fn from(usage: WireUsage) -> Self {
        if usage.prompt_tokens == 0 {
            return Self::default();
        }

        Self {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}
