use std::collections::HashSet;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{Config, FoundryConfig};

const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
const API_VERSION_VAR: &str = "AZURE_OPENAI_API_VERSION";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(path = %path.display(), models = config.foundry.models.len(), "loaded configuration");

        Ok(config)
    }

    /// Build configuration from `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_KEY`
    /// and the optional `AZURE_OPENAI_API_VERSION`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or empty, or the
    /// endpoint is not a valid URL
    pub fn from_env() -> anyhow::Result<Self> {
        let endpoint = required_var(ENDPOINT_VAR)?;
        let api_key = required_var(API_KEY_VAR)?;

        let endpoint =
            Url::parse(&endpoint).map_err(|e| anyhow::anyhow!("{ENDPOINT_VAR} is not a valid URL: {e}"))?;

        let mut foundry = FoundryConfig::with_api_key(endpoint, SecretString::from(api_key));
        foundry.api_version = std::env::var(API_VERSION_VAR).ok().filter(|v| !v.is_empty());

        let config = Self {
            foundry,
            telemetry: None,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint scheme is not HTTP(S), credentials
    /// are missing or ambiguous, or model names are empty or duplicated
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_endpoint()?;
        self.validate_credentials()?;
        self.validate_deployments()?;
        Ok(())
    }

    fn validate_endpoint(&self) -> anyhow::Result<()> {
        let scheme = self.foundry.endpoint.scheme();

        if scheme != "http" && scheme != "https" {
            anyhow::bail!("foundry.endpoint must use http or https, got '{scheme}'");
        }

        Ok(())
    }

    /// Exactly one of `api_key` and `bearer_token` must be set and non-empty
    fn validate_credentials(&self) -> anyhow::Result<()> {
        let present = |secret: Option<&SecretString>| secret.is_some_and(|s| !s.expose_secret().is_empty());

        match (
            present(self.foundry.api_key.as_ref()),
            present(self.foundry.bearer_token.as_ref()),
        ) {
            (true, false) | (false, true) => Ok(()),
            (false, false) => anyhow::bail!("foundry requires either api_key or bearer_token"),
            (true, true) => anyhow::bail!("foundry.api_key and foundry.bearer_token are mutually exclusive"),
        }
    }

    fn validate_deployments(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();

        let names = self
            .foundry
            .models
            .iter()
            .map(|m| m.name.as_str())
            .chain(self.foundry.embedders.iter().map(String::as_str));

        for name in names {
            if name.trim().is_empty() {
                anyhow::bail!("deployment names must not be empty");
            }

            if !seen.insert(name) {
                anyhow::bail!("deployment '{name}' is defined more than once");
            }
        }

        Ok(())
    }
}

fn required_var(name: &str) -> anyhow::Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => anyhow::bail!("{name} environment variable is required"),
    }
}
