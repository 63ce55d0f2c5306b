//! Azure `OpenAI` v1 endpoint transport

use async_trait::async_trait;
use eventsource_stream::{Event, EventStreamError, Eventsource};
use foundry_config::FoundryConfig;
use futures_util::{StreamExt, future};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use url::Url;

use super::{ChunkStream, Transport};
use crate::error::LlmError;
use crate::protocol::openai::{
    ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, EmbeddingRequest, EmbeddingResponse, ErrorResponse,
};

/// Path appended to the resource endpoint
const API_BASE_PATH: &str = "/openai/v1";

/// Terminal event data of a chat completion stream
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone)]
enum Credential {
    ApiKey(SecretString),
    Bearer(SecretString),
}

/// HTTP transport for an Azure AI Foundry resource
#[derive(Debug, Clone)]
pub struct AzureTransport {
    client: Client,
    base_url: Url,
    api_version: Option<String>,
    credential: Credential,
}

impl AzureTransport {
    /// Create from the resource configuration
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Configuration`] if no credential is configured or
    /// the endpoint cannot be extended with the API base path.
    pub fn new(config: &FoundryConfig) -> Result<Self, LlmError> {
        let non_empty =
            |secret: Option<&SecretString>| secret.filter(|s| !s.expose_secret().is_empty()).cloned();

        let credential = match (non_empty(config.api_key.as_ref()), non_empty(config.bearer_token.as_ref())) {
            (Some(key), _) => Credential::ApiKey(key),
            (None, Some(token)) => Credential::Bearer(token),
            (None, None) => {
                return Err(LlmError::Configuration(
                    "an api key or bearer token is required".to_owned(),
                ));
            }
        };

        let endpoint = config.endpoint.as_str().trim_end_matches('/');
        let base_url = Url::parse(&format!("{endpoint}{API_BASE_PATH}"))
            .map_err(|e| LlmError::Configuration(format!("invalid endpoint {endpoint}: {e}")))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_version: config.api_version.clone(),
            credential,
        })
    }

    /// Base URL all request paths are appended to
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn post(&self, path: &str, body: &impl Serialize) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));

        let mut builder = self.client.post(url).json(body);

        if let Some(version) = &self.api_version {
            builder = builder.query(&[("api-version", version)]);
        }

        match &self.credential {
            Credential::ApiKey(key) => builder.header("api-key", key.expose_secret()),
            Credential::Bearer(token) => builder.bearer_auth(token.expose_secret()),
        }
    }

    async fn send_chat(&self, request: &ChatCompletionRequest) -> Result<Response, LlmError> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            stream = request.stream.unwrap_or(false),
            "sending chat completion request"
        );

        let response = self.post("/chat/completions", request).send().await.map_err(|e| {
            tracing::error!(model = %request.model, error = %e, "upstream request failed");
            LlmError::Upstream {
                model: request.model.clone(),
                status: None,
                message: e.to_string(),
            }
        })?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;

        tracing::warn!(model = %request.model, status = %status, "upstream returned error");

        Err(LlmError::Upstream {
            model: request.model.clone(),
            status: Some(status.as_u16()),
            message: format!("endpoint returned {status}: {message}"),
        })
    }
}

#[async_trait]
impl Transport for AzureTransport {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion, LlmError> {
        let response = self.send_chat(request).await?;

        response.json().await.map_err(|e| LlmError::Upstream {
            model: request.model.clone(),
            status: None,
            message: format!("failed to parse response: {e}"),
        })
    }

    async fn complete_stream(&self, request: &ChatCompletionRequest) -> Result<ChunkStream, LlmError> {
        let response = self.send_chat(request).await?;
        let model = request.model.clone();

        let chunks = response
            .bytes_stream()
            .eventsource()
            .take_while(|event| future::ready(!matches!(event, Ok(e) if e.data.trim() == DONE_SENTINEL)))
            .filter_map(move |event| future::ready(parse_event(&model, event)));

        Ok(Box::pin(chunks))
    }

    async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse, LlmError> {
        let embedding_error = |message: String| LlmError::Embedding {
            model: request.model.clone(),
            message,
        };

        let response = self
            .post("/embeddings", request)
            .send()
            .await
            .map_err(|e| embedding_error(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let message = error_message(response).await;
            tracing::warn!(model = %request.model, status = %status, "embedding request failed");
            return Err(embedding_error(format!("endpoint returned {status}: {message}")));
        }

        response
            .json()
            .await
            .map_err(|e| embedding_error(format!("failed to parse response: {e}")))
    }
}

/// Error message from a failed response body, falling back to the raw text
async fn error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();

    serde_json::from_str::<ErrorResponse>(&body).map_or(body, |parsed| parsed.error.message)
}

/// Turn one SSE event into a chunk
///
/// Blank and unparseable events are skipped. Transport failures become a
/// terminal [`LlmError::Stream`] item.
fn parse_event<E: std::fmt::Display>(
    model: &str,
    event: Result<Event, EventStreamError<E>>,
) -> Option<Result<ChatCompletionChunk, LlmError>> {
    match event {
        Ok(event) => {
            let data = event.data.trim();

            if data.is_empty() {
                return None;
            }

            serde_json::from_str::<ChatCompletionChunk>(data)
                .inspect_err(|e| tracing::warn!(model, error = %e, "skipping unparseable stream event"))
                .ok()
                .map(Ok)
        }
        Err(e) => Some(Err(LlmError::Stream {
            model: model.to_owned(),
            message: e.to_string(),
        })),
    }
}
