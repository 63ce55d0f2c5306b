use std::io::Write;

use foundry_config::FoundryConfig;
use foundry_llm::catalog::{self, COMMON_EMBEDDERS};
use foundry_llm::{EmbedRequest, FoundryClient, Message, ModelRequest, ModelResponse, ModelResponseChunk, SinkError};
use tokio_util::sync::CancellationToken;

/// Build a single-turn chat request from command line input
pub fn chat_request(
    model: String,
    system: Option<String>,
    prompt: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
) -> ModelRequest {
    let messages = system
        .map(Message::system)
        .into_iter()
        .chain(std::iter::once(Message::user(prompt)))
        .collect();

    let mut sampling = serde_json::Map::new();

    if let Some(temperature) = temperature {
        sampling.insert("temperature".to_owned(), temperature.into());
    }

    if let Some(max_tokens) = max_tokens {
        sampling.insert("maxOutputTokens".to_owned(), max_tokens.into());
    }

    let request = ModelRequest::new(model, messages);

    if sampling.is_empty() {
        request
    } else {
        request.with_config(serde_json::Value::Object(sampling))
    }
}

pub async fn generate(
    client: &FoundryClient,
    request: &ModelRequest,
    stream: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    if !stream {
        let response = client.generate(request, cancel).await?;
        println!("{}", response.text());
        print_usage(&response);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    let mut sink = |chunk: ModelResponseChunk| -> Result<(), SinkError> {
        stdout.write_all(chunk.text_content().as_bytes())?;
        stdout.flush()?;
        Ok(())
    };

    let response = client.generate_stream(request, Some(&mut sink), cancel).await?;

    println!();
    print_usage(&response);

    Ok(())
}

fn print_usage(response: &ModelResponse) {
    tracing::info!(
        finish_reason = ?response.finish_reason,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        total_tokens = response.usage.total_tokens,
        "generation finished"
    );
}

pub async fn embed(
    client: &FoundryClient,
    model: &str,
    texts: Vec<String>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let response = client.embed(model, &EmbedRequest::from_texts(texts), cancel).await?;

    for (index, embedding) in response.embeddings.iter().enumerate() {
        println!("{index}: {} dimensions", embedding.embedding.len());
    }

    Ok(())
}

/// Print configured deployments, or the common catalog when none are configured
pub fn models(config: &FoundryConfig) {
    let definitions = if config.models.is_empty() {
        catalog::common_models()
    } else {
        config.models.clone()
    };

    for definition in &definitions {
        let info = catalog::infer_capabilities(definition);
        println!(
            "{:<32} tools={:<5} vision={:<5} multiturn={}",
            catalog::qualified_name(&info.label),
            info.supports.tools,
            info.supports.media,
            info.supports.multiturn,
        );
    }

    let embedders: Vec<&str> = if config.embedders.is_empty() {
        COMMON_EMBEDDERS.to_vec()
    } else {
        config.embedders.iter().map(String::as_str).collect()
    };

    for embedder in embedders {
        println!("{:<32} embedder", catalog::qualified_name(embedder));
    }
}

#[cfg(test)]
mod tests {
    use foundry_llm::Role;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_without_options_has_no_config() {
        let request = chat_request("gpt-4o".to_owned(), None, "hi".to_owned(), None, None);

        assert_eq!(request.messages, [Message::user("hi")]);
        assert!(request.config.is_none());
    }

    #[test]
    fn system_and_sampling_options_are_carried() {
        let request = chat_request(
            "gpt-4o".to_owned(),
            Some("be brief".to_owned()),
            "hi".to_owned(),
            Some(0.5),
            Some(64),
        );

        let roles: Vec<_> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::System, Role::User]);
        assert_eq!(request.config, Some(json!({ "temperature": 0.5, "maxOutputTokens": 64 })));
    }
}
