use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Connection settings for an Azure AI Foundry resource
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoundryConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: Url,
    /// API key sent in the `api-key` header
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Pre-resolved Entra ID token sent as a bearer credential
    #[serde(default)]
    pub bearer_token: Option<SecretString>,
    /// Value of the `api-version` query parameter (omitted when unset)
    #[serde(default)]
    pub api_version: Option<String>,
    /// Chat deployments exposed by this resource
    #[serde(default)]
    pub models: Vec<ModelDefinition>,
    /// Embedding deployments exposed by this resource
    #[serde(default)]
    pub embedders: Vec<String>,
}

impl FoundryConfig {
    /// Minimal config with API key authentication
    pub fn with_api_key(endpoint: Url, api_key: SecretString) -> Self {
        Self {
            endpoint,
            api_key: Some(api_key),
            bearer_token: None,
            api_version: None,
            models: Vec::new(),
            embedders: Vec::new(),
        }
    }
}

/// A model deployment
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDefinition {
    /// Deployment name
    pub name: String,
    /// Kind of model behind the deployment
    #[serde(default, rename = "type")]
    pub kind: ModelKind,
    /// Maximum tokens the model can handle
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Whether the model accepts image input
    #[serde(default)]
    pub supports_vision: bool,
}

impl ModelDefinition {
    /// Chat deployment with default capabilities
    pub fn chat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ModelKind::Chat,
            max_tokens: None,
            supports_vision: false,
        }
    }

    /// Mark the deployment as vision-capable
    #[must_use]
    pub const fn with_vision(mut self) -> Self {
        self.supports_vision = true;
        self
    }
}

/// Kind of model behind a deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Chat completion model
    #[default]
    Chat,
    /// Plain text completion model
    Text,
}
