//! Boundary between the translation layer and the network

mod azure;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

pub use azure::AzureTransport;

use crate::error::LlmError;
use crate::protocol::openai::{
    ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, EmbeddingRequest, EmbeddingResponse,
};

/// Streamed deltas of one response
///
/// An `Err` item is terminal. Dropping the stream releases the underlying
/// connection.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, LlmError>> + Send>>;

/// Sends wire requests to a chat completion endpoint
///
/// Implementations own retries, timeouts and connection reuse. Errors must
/// name the model of the request that failed.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a non-streaming chat completion request
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion, LlmError>;

    /// Send a streaming chat completion request
    async fn complete_stream(&self, request: &ChatCompletionRequest) -> Result<ChunkStream, LlmError>;

    /// Embed one input text
    async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse, LlmError>;
}
