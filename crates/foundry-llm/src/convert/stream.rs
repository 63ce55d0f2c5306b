//! Reassembly of streamed chat completion deltas
//!
//! Text fragments are appended to a buffer and forwarded to the caller's
//! [`ChunkSink`] as they arrive. Tool call fragments are buffered per wire
//! index, so interleaved calls never share an argument buffer. Once the
//! stream ends the buffers are turned into a single [`ModelResponse`].

use std::collections::BTreeMap;

use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use super::decode_arguments;
use crate::error::{LlmError, SinkError};
use crate::protocol::openai::{ChatCompletionChunk, ToolCallDelta};
use crate::types::{FinishReason, ModelResponse, ModelResponseChunk, Part, ToolRequest, Usage};

/// Receiver of text chunks while a response streams in
///
/// Called inline, once per non-empty text fragment and in arrival order.
/// Returning an error aborts the stream.
pub trait ChunkSink: Send {
    /// Handle one chunk
    fn on_chunk(&mut self, chunk: ModelResponseChunk) -> Result<(), SinkError>;
}

impl<F> ChunkSink for F
where
    F: FnMut(ModelResponseChunk) -> Result<(), SinkError> + Send,
{
    fn on_chunk(&mut self, chunk: ModelResponseChunk) -> Result<(), SinkError> {
        self(chunk)
    }
}

/// Tool call being assembled from streamed fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallFragment {
    /// Correlation id from the first fragment that carried one
    pub id: Option<String>,
    /// Function name, empty until a fragment names it
    pub name: String,
    /// Concatenated argument text
    pub arguments: String,
}

impl ToolCallFragment {
    fn absorb(&mut self, delta: &ToolCallDelta) {
        if self.id.is_none()
            && let Some(id) = delta.id.as_deref().filter(|id| !id.is_empty())
        {
            self.id = Some(id.to_owned());
        }

        let Some(function) = &delta.function else {
            return;
        };

        if let Some(name) = function.name.as_deref().filter(|name| !name.is_empty()) {
            name.clone_into(&mut self.name);
        }

        if let Some(arguments) = &function.arguments {
            self.arguments.push_str(arguments);
        }
    }
}

/// Accumulates the deltas of one streamed response
///
/// Feed chunks with [`push`](Self::push) and consume the accumulator with
/// [`finish`](Self::finish). On any error the accumulator should simply be
/// dropped, nothing partial is ever assembled.
#[derive(Debug)]
pub struct StreamAccumulator {
    model: String,
    text: String,
    fragments: BTreeMap<u32, ToolCallFragment>,
}

impl StreamAccumulator {
    /// Empty accumulator for a call against `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            text: String::new(),
            fragments: BTreeMap::new(),
        }
    }

    /// Text received so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tool call fragment at a wire index
    pub fn fragment(&self, index: u32) -> Option<&ToolCallFragment> {
        self.fragments.get(&index)
    }

    /// Process one delta
    ///
    /// Only the first choice is read. Chunks without choices, such as
    /// trailing usage reports, are ignored.
    pub fn push(
        &mut self,
        chunk: &ChatCompletionChunk,
        sink: Option<&mut (dyn ChunkSink + '_)>,
    ) -> Result<(), LlmError> {
        let Some(choice) = chunk.choices.first() else {
            return Ok(());
        };

        let delta = &choice.delta;

        if let Some(text) = delta.content.as_deref().filter(|text| !text.is_empty()) {
            self.text.push_str(text);

            if let Some(sink) = sink {
                sink.on_chunk(ModelResponseChunk::text(text)).map_err(|source| {
                    tracing::debug!(model = %self.model, error = %source, "chunk sink failed, aborting stream");
                    LlmError::Callback {
                        model: self.model.clone(),
                        source,
                    }
                })?;
            }
        }

        for fragment in delta.tool_calls.iter().flatten() {
            self.fragments.entry(fragment.index).or_default().absorb(fragment);
        }

        Ok(())
    }

    /// Assemble the final response
    ///
    /// Text comes first, then one tool request per named fragment. Unnamed
    /// fragments are skipped. Arguments that fail to parse fail the whole
    /// response. The finish reason is always [`FinishReason::Stop`] and usage
    /// is left at zero.
    pub fn finish(self) -> Result<ModelResponse, LlmError> {
        let Self {
            model,
            text,
            fragments,
        } = self;

        let mut content = Vec::with_capacity(fragments.len() + 1);

        if !text.is_empty() {
            content.push(Part::Text(text));
        }

        for (index, fragment) in fragments {
            if fragment.name.is_empty() {
                tracing::warn!(model = %model, index, "skipping tool call fragment that never received a name");
                continue;
            }

            let input = match decode_arguments(&fragment.arguments) {
                Ok(input) => input,
                Err(source) => {
                    return Err(LlmError::ToolCallDecode {
                        model,
                        tool: fragment.name,
                        source,
                    });
                }
            };

            content.push(Part::ToolRequest(ToolRequest {
                name: fragment.name,
                input,
            }));
        }

        Ok(ModelResponse::new(content, FinishReason::Stop, Usage::default()))
    }
}

/// Drive a delta stream to completion
///
/// The first `Err` item from the stream is terminal and returned as is.
/// Cancellation is checked before every read. The stream is dropped on every
/// return path.
pub async fn assemble_stream<S>(
    model: &str,
    mut stream: S,
    mut sink: Option<&mut (dyn ChunkSink + '_)>,
    cancel: &CancellationToken,
) -> Result<ModelResponse, LlmError>
where
    S: Stream<Item = Result<ChatCompletionChunk, LlmError>> + Unpin,
{
    let mut accumulator = StreamAccumulator::new(model);
    let mut deltas = 0_usize;

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(model, deltas, "stream cancelled");
                return Err(LlmError::Cancelled { model: model.to_owned() });
            }
            next = stream.next() => next,
        };

        match next {
            Some(Ok(chunk)) => {
                deltas += 1;
                accumulator.push(&chunk, sink.as_deref_mut())?;
            }
            Some(Err(e)) => {
                tracing::error!(model, deltas, error = %e, "stream failed");
                return Err(e);
            }
            None => break,
        }
    }

    tracing::debug!(model, deltas, "stream finished");

    accumulator.finish()
}
