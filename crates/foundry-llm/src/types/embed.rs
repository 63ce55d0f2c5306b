use serde::{Deserialize, Serialize};

use super::message::Part;

/// Documents to embed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Documents in order
    pub documents: Vec<Document>,
}

impl EmbedRequest {
    /// One single-text document per input
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: texts
                .into_iter()
                .map(|text| Document {
                    content: vec![Part::Text(text.into())],
                })
                .collect(),
        }
    }
}

/// One document, embedded as the concatenation of its text parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Content parts
    pub content: Vec<Part>,
}

impl Document {
    /// Concatenated text of the document
    pub fn text(&self) -> String {
        self.content.iter().filter_map(Part::as_text).collect()
    }
}

/// Vectors for the documents that had text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// Embeddings in document order
    pub embeddings: Vec<Embedding>,
}

/// A single embedding vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// Vector components
    pub embedding: Vec<f32>,
}
