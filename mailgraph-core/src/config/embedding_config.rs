use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub endpoint: String,
    pub model: String,
    /// Fixed dimensionality per deployment; responses are padded or
    /// truncated to this length.
    pub dimensions: usize,
    pub max_retries: u32,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            api_key_env: defaults::DEFAULT_EMBEDDING_API_KEY_ENV.to_string(),
        }
    }
}
