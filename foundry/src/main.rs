#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod commands;

use args::{Args, Command};
use clap::Parser;
use foundry_config::Config;
use foundry_llm::FoundryClient;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    foundry_telemetry::init(config.telemetry.as_ref(), args.log.as_deref())?;

    tracing::debug!(endpoint = %config.foundry.endpoint, "configuration loaded");

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();

    tokio::spawn(async move {
        interrupt_signal().await;
        cancel_on_signal.cancel();
    });

    match args.command {
        Command::Generate {
            model,
            system,
            stream,
            temperature,
            max_tokens,
            prompt,
        } => {
            let client = FoundryClient::new(&config.foundry)?;
            let request = commands::chat_request(model, system, prompt, temperature, max_tokens);
            commands::generate(&client, &request, stream, &cancel).await
        }
        Command::Embed { model, texts } => {
            let client = FoundryClient::new(&config.foundry)?;
            commands::embed(&client, &model, texts, &cancel).await
        }
        Command::Models => {
            commands::models(&config.foundry);
            Ok(())
        }
    }
}

/// Wait for Ctrl+C
async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }

    tracing::info!("interrupt received, cancelling");
}
