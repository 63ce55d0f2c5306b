#![allow(clippy::must_use_candidate)]

//! Configuration for the Azure AI Foundry bridge
//!
//! Loaded from a TOML file with `{{ env.VAR }}` placeholders, or directly
//! from the `AZURE_OPENAI_*` environment variables.

mod env;
pub mod foundry;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use foundry::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Azure AI Foundry endpoint and deployments
    pub foundry: FoundryConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
