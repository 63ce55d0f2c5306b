//! Azure AI Foundry chat translation layer
//!
//! Translates provider-agnostic chat requests into the Azure `OpenAI`
//! chat-completion wire format and assembles sync and streamed responses
//! back into [`ModelResponse`] values.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod catalog;
pub mod client;
pub mod convert;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod types;

pub use client::FoundryClient;
pub use convert::stream::{ChunkSink, StreamAccumulator, ToolCallFragment};
pub use error::{LlmError, SinkError};
pub use transport::{AzureTransport, ChunkStream, Transport};
pub use types::{
    Document, EmbedRequest, EmbedResponse, Embedding, FinishReason, Media, Message, ModelRequest, ModelResponse,
    ModelResponseChunk, Part, Role, SamplingConfig, ToolChoice, ToolDefinition, ToolRequest, ToolResponse, Usage,
};
