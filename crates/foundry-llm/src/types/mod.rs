//! Provider-agnostic request and response model
//!
//! Callers build [`ModelRequest`] values from these types. The translation
//! layer in [`crate::convert`] maps them to and from the wire format.

pub mod config;
pub mod embed;
pub mod message;
pub mod request;
pub mod response;
pub mod tool;

pub use config::{SamplingConfig, ToolChoice};
pub use embed::{Document, EmbedRequest, EmbedResponse, Embedding};
pub use message::{Media, Message, Part, Role, ToolRequest, ToolResponse};
pub use request::ModelRequest;
pub use response::{FinishReason, ModelResponse, ModelResponseChunk, Usage};
pub use tool::ToolDefinition;
