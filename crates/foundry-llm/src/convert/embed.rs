use crate::protocol::openai::{EmbeddingRequest, EmbeddingResponse};
use crate::types::{EmbedRequest, Embedding};

/// One wire request per document that has text
pub fn embedding_requests(model: &str, request: &EmbedRequest) -> Vec<EmbeddingRequest> {
    request
        .documents
        .iter()
        .map(|document| document.text())
        .filter(|text| !text.is_empty())
        .map(|input| EmbeddingRequest {
            model: model.to_owned(),
            input,
        })
        .collect()
}

/// First vector of a response, narrowed to `f32`
#[allow(clippy::cast_possible_truncation)]
pub fn first_embedding(response: EmbeddingResponse) -> Option<Embedding> {
    let data = response.data.into_iter().next()?;

    Some(Embedding {
        embedding: data.embedding.into_iter().map(|v| v as f32).collect(),
    })
}
