//! Well-known Azure deployments and their inferred capabilities

use foundry_config::ModelDefinition;

/// Namespace used for qualified model names
pub const PROVIDER: &str = "azureaifoundry";

/// Embedding deployments available on most resources
pub const COMMON_EMBEDDERS: [&str; 3] = ["text-embedding-ada-002", "text-embedding-3-small", "text-embedding-3-large"];

/// Name families known to accept tool definitions
const TOOL_FAMILIES: [&str; 3] = ["gpt-4", "gpt-35-turbo", "gpt-3.5-turbo"];

/// Feature flags of a model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelSupports {
    /// Accepts conversation history
    pub multiturn: bool,
    /// Accepts a system instruction
    pub system_role: bool,
    /// Accepts tool definitions
    pub tools: bool,
    /// Accepts image input
    pub media: bool,
}

/// Display metadata for a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Human-readable label
    pub label: String,
    /// Feature flags
    pub supports: ModelSupports,
}

/// `azureaifoundry/<model>`
pub fn qualified_name(model: &str) -> String {
    format!("{PROVIDER}/{model}")
}

/// Infer capabilities from a deployment definition
///
/// Tool support is guessed from the deployment name, media support comes
/// from `supports_vision`.
pub fn infer_capabilities(definition: &ModelDefinition) -> ModelInfo {
    let name = definition.name.to_lowercase();

    ModelInfo {
        label: definition.name.clone(),
        supports: ModelSupports {
            multiturn: true,
            system_role: true,
            tools: TOOL_FAMILIES.iter().any(|family| name.contains(family)),
            media: definition.supports_vision,
        },
    }
}

/// Chat deployments available on most resources
pub fn common_models() -> Vec<ModelDefinition> {
    let vision = ["gpt-5", "gpt-5-mini", "gpt-4o", "gpt-4o-mini", "gpt-4-turbo"]
        .into_iter()
        .map(|name| ModelDefinition::chat(name).with_vision());

    let text_only = ["gpt-4", "gpt-35-turbo"].into_iter().map(ModelDefinition::chat);

    vision.chain(text_only).collect()
}
