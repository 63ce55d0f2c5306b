use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Azure AI Foundry command line client
#[derive(Debug, Parser)]
#[command(name = "foundry", about = "Chat completions and embeddings against Azure AI Foundry deployments")]
pub struct Args {
    /// Path to configuration file, `AZURE_OPENAI_*` variables are used when absent
    #[arg(short, long, env = "FOUNDRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, overrides the configured one
    #[arg(long, env = "FOUNDRY_LOG")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a chat completion
    Generate {
        /// Deployment name
        #[arg(short, long)]
        model: String,

        /// System instruction
        #[arg(short, long)]
        system: Option<String>,

        /// Print text as it streams in
        #[arg(long)]
        stream: bool,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f64>,

        /// Maximum tokens to generate
        #[arg(long)]
        max_tokens: Option<u32>,

        /// User prompt
        prompt: String,
    },

    /// Embed one or more texts
    Embed {
        /// Embedding deployment name
        #[arg(short, long)]
        model: String,

        /// Texts to embed, one document each
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// List well-known deployments and their capabilities
    Models,
}
