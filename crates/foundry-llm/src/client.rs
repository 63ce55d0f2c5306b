//! Immutable client handle over a [`Transport`]

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use foundry_config::FoundryConfig;
use tokio_util::sync::CancellationToken;

use crate::convert::embed::{embedding_requests, first_embedding};
use crate::convert::request::build_request;
use crate::convert::response::assemble_response;
use crate::convert::stream::{ChunkSink, assemble_stream};
use crate::error::LlmError;
use crate::transport::{AzureTransport, Transport};
use crate::types::{EmbedRequest, EmbedResponse, ModelRequest, ModelResponse};

/// Handle for generating against an Azure AI Foundry resource
///
/// Cheap to clone. Calls share nothing but the transport.
#[derive(Clone)]
pub struct FoundryClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for FoundryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoundryClient").finish_non_exhaustive()
    }
}

impl FoundryClient {
    /// Create a client backed by [`AzureTransport`]
    pub fn new(config: &FoundryConfig) -> Result<Self, LlmError> {
        let transport = AzureTransport::new(config)?;

        tracing::debug!(base_url = %transport.base_url(), "initialized azure transport");

        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Generate a complete response
    pub async fn generate(&self, request: &ModelRequest, cancel: &CancellationToken) -> Result<ModelResponse, LlmError> {
        let wire = build_request(request);

        let completion = cancellable(&request.model, cancel, self.transport.complete(&wire)).await?;

        let response = assemble_response(completion);

        tracing::debug!(
            model = %request.model,
            finish_reason = ?response.finish_reason,
            parts = response.message.content.len(),
            "chat completion assembled"
        );

        Ok(response)
    }

    /// Generate a streamed response
    ///
    /// Text fragments are passed to `sink` as they arrive. A sink error
    /// aborts the stream. Chunks already delivered are not retracted when
    /// the call fails later.
    pub async fn generate_stream(
        &self,
        request: &ModelRequest,
        sink: Option<&mut (dyn ChunkSink + '_)>,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, LlmError> {
        let mut wire = build_request(request);
        wire.stream = Some(true);

        let stream = cancellable(&request.model, cancel, self.transport.complete_stream(&wire)).await?;

        assemble_stream(&request.model, stream, sink, cancel).await
    }

    /// Embed each document that has text
    ///
    /// One request is sent per document. The first failure aborts the call.
    pub async fn embed(
        &self,
        model: &str,
        request: &EmbedRequest,
        cancel: &CancellationToken,
    ) -> Result<EmbedResponse, LlmError> {
        let mut embeddings = Vec::with_capacity(request.documents.len());

        for wire in embedding_requests(model, request) {
            let response = cancellable(model, cancel, self.transport.embed(&wire)).await?;
            embeddings.extend(first_embedding(response));
        }

        Ok(EmbedResponse { embeddings })
    }
}

/// Await `call` unless `cancel` fires first
async fn cancellable<T>(
    model: &str,
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, LlmError>>,
) -> Result<T, LlmError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!(model, "request cancelled");
            Err(LlmError::Cancelled { model: model.to_owned() })
        }
        result = call => result,
    }
}
