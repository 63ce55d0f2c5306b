//! Conversation messages to wire messages
//!
//! System and user messages carry only their first text part. Model messages
//! concatenate every text part and turn tool requests into tool calls. Tool
//! messages fan out into one wire message per tool response. Messages without
//! parts are skipped, as are tool inputs and outputs that fail to serialize.

use super::tool_call_id;
use crate::protocol::openai::{WireFunctionCall, WireMessage, WireToolCall, function_type};
use crate::types::{Message, Part, Role, ToolRequest, ToolResponse};

/// Translate messages in order
pub fn translate_messages(messages: &[Message]) -> Vec<WireMessage> {
    let mut wire = Vec::with_capacity(messages.len());

    for message in messages {
        if message.content.is_empty() {
            tracing::debug!(role = ?message.role, "skipping message without content");
            continue;
        }

        match message.role {
            Role::System => wire.push(WireMessage::System {
                content: first_text(message),
            }),
            Role::User => wire.push(WireMessage::User {
                content: first_text(message),
            }),
            Role::Model => wire.push(assistant_message(message)),
            Role::Tool => wire.extend(message.content.iter().filter_map(|part| match part {
                Part::ToolResponse(response) => tool_result(response),
                Part::Text(_) | Part::ToolRequest(_) | Part::Media(_) => None,
            })),
        }
    }

    wire
}

/// Only the first text part is sent for system and user turns
fn first_text(message: &Message) -> String {
    message
        .content
        .iter()
        .find_map(Part::as_text)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn assistant_message(message: &Message) -> WireMessage {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for part in &message.content {
        match part {
            Part::Text(fragment) => text.push_str(fragment),
            Part::ToolRequest(request) => tool_calls.extend(tool_call(request)),
            Part::ToolResponse(_) | Part::Media(_) => {}
        }
    }

    WireMessage::Assistant {
        content: Some(text),
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
    }
}

fn tool_call(request: &ToolRequest) -> Option<WireToolCall> {
    let arguments = serde_json::to_string(&request.input)
        .inspect_err(|e| tracing::warn!(tool = %request.name, error = %e, "dropping tool request with unserializable input"))
        .ok()?;

    Some(WireToolCall {
        id: tool_call_id(&request.name),
        tool_type: function_type(),
        function: WireFunctionCall {
            name: request.name.clone(),
            arguments,
        },
    })
}

fn tool_result(response: &ToolResponse) -> Option<WireMessage> {
    let content = serde_json::to_string(&response.output)
        .inspect_err(|e| tracing::warn!(tool = %response.name, error = %e, "dropping tool response with unserializable output"))
        .ok()?;

    Some(WireMessage::Tool {
        content,
        tool_call_id: tool_call_id(&response.name),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Media;

    fn text_message(role: Role, parts: &[&str]) -> Message {
        Message::new(role, parts.iter().map(|p| Part::from(*p)).collect())
    }

    #[test]
    fn one_wire_message_per_non_empty_text_message() {
        let messages = vec![
            Message::system("be terse"),
            text_message(Role::User, &[]),
            Message::user("hi"),
            Message::model("hello"),
            text_message(Role::Model, &[]),
            text_message(Role::User, &["a", "b"]),
        ];

        let non_empty = messages.iter().filter(|m| !m.content.is_empty()).count();

        assert_eq!(translate_messages(&messages).len(), non_empty);
    }

    #[test]
    fn user_message_uses_first_text_part_only() {
        let message = Message::new(
            Role::User,
            vec![
                Part::Media(Media {
                    url: "https://example.com/cat.png".to_owned(),
                    content_type: Some("image/png".to_owned()),
                }),
                Part::from("first"),
                Part::from("second"),
            ],
        );

        assert_eq!(
            translate_messages(&[message]),
            [WireMessage::User {
                content: "first".to_owned()
            }]
        );
    }

    #[test]
    fn model_message_concatenates_text_and_collects_tool_calls() {
        let message = Message::new(
            Role::Model,
            vec![
                Part::from("Let me "),
                Part::ToolRequest(ToolRequest {
                    name: "get_weather".to_owned(),
                    input: json!({ "city": "Oslo" }),
                }),
                Part::from("check."),
            ],
        );

        let wire = translate_messages(&[message]);

        let [WireMessage::Assistant { content, tool_calls }] = wire.as_slice() else {
            panic!("expected one assistant message, got {wire:?}");
        };

        assert_eq!(content.as_deref(), Some("Let me check."));

        let calls = tool_calls.as_ref().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_get_weather");
        assert_eq!(calls[0].tool_type, "function");
        assert_eq!(calls[0].function.name, "get_weather");
        assert_eq!(calls[0].function.arguments, r#"{"city":"Oslo"}"#);
    }

    #[test]
    fn model_message_without_tool_requests_has_no_tool_calls() {
        let wire = translate_messages(&[Message::model("done")]);

        assert_eq!(
            wire,
            [WireMessage::Assistant {
                content: Some("done".to_owned()),
                tool_calls: None,
            }]
        );
    }

    #[test]
    fn tool_message_emits_one_result_per_response() {
        let message = Message::new(
            Role::Tool,
            vec![
                Part::ToolResponse(ToolResponse {
                    name: "get_weather".to_owned(),
                    output: json!({ "temp": 21 }),
                }),
                Part::from("ignored"),
                Part::ToolResponse(ToolResponse {
                    name: "get_time".to_owned(),
                    output: json!("12:00"),
                }),
            ],
        );

        assert_eq!(
            translate_messages(&[message]),
            [
                WireMessage::Tool {
                    content: r#"{"temp":21}"#.to_owned(),
                    tool_call_id: "call_get_weather".to_owned(),
                },
                WireMessage::Tool {
                    content: r#""12:00""#.to_owned(),
                    tool_call_id: "call_get_time".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn tool_message_without_responses_is_dropped() {
        assert!(translate_messages(&[text_message(Role::Tool, &["only text"])]).is_empty());
    }

    #[test]
    fn preserves_message_order() {
        let messages = vec![Message::system("s"), Message::user("u"), Message::model("m")];

        let roles: Vec<_> = translate_messages(&messages)
            .into_iter()
            .map(|m| match m {
                WireMessage::System { .. } => "system",
                WireMessage::User { .. } => "user",
                WireMessage::Assistant { .. } => "assistant",
                WireMessage::Tool { .. } => "tool",
            })
            .collect();

        assert_eq!(roles, ["system", "user", "assistant"]);
    }
}
