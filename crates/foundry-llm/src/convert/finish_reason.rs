use crate::types::FinishReason;

/// Map a wire finish reason onto [`FinishReason`]
///
/// Never yields [`FinishReason::Unknown`], which is reserved for responses
/// without any choice.
pub fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" | "tool_calls" | "function_call" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::Blocked,
        _ => FinishReason::Other,
    }
}
