//! Configuration structs, one per subsystem, with a `defaults` module as
//! the single source of truth for default values. All structs deserialize
//! from TOML with `#[serde(default)]`.

pub mod defaults;

mod cache_config;
mod embedding_config;
mod extractor_config;
mod graph_config;
mod ranking_config;
mod retrieval_config;

pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use extractor_config::{ExtractorConfig, TypeKeywordGroup};
pub use graph_config::GraphConfig;
pub use ranking_config::RankingConfig;
pub use retrieval_config::RetrievalConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{MailgraphError, MailgraphResult};

/// Top-level configuration for the whole workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailgraphConfig {
    pub cache: CacheConfig,
    pub retrieval: RetrievalConfig,
    pub ranking: RankingConfig,
    pub graph: GraphConfig,
    pub embedding: EmbeddingConfig,
    pub extractor: ExtractorConfig,
}

impl MailgraphConfig {
    pub fn from_toml_str(raw: &str) -> MailgraphResult<Self> {
        toml::from_str(raw).map_err(|e| MailgraphError::Config {
            reason: e.to_string(),
        })
    }

    pub fn load(path: &std::path::Path) -> MailgraphResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| MailgraphError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = MailgraphConfig::from_toml_str("").unwrap();
        assert_eq!(config.retrieval.top_k, defaults::DEFAULT_TOP_K);
        assert_eq!(config.cache.default_ttl_secs, defaults::DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = MailgraphConfig::from_toml_str(
            "[retrieval]\ntop_k = 10\n\n[ranking]\nproduct_weight = 0.2\n",
        )
        .unwrap();
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.retrieval.overfetch_factor, defaults::DEFAULT_OVERFETCH_FACTOR);
        assert_eq!(config.ranking.product_weight, 0.2);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = MailgraphConfig::from_toml_str("retrieval = 3").unwrap_err();
        assert!(matches!(err, MailgraphError::Config { .. }));
    }
}
