use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: defaults::DEFAULT_GRAPH_URI.to_string(),
            user: defaults::DEFAULT_GRAPH_USER.to_string(),
            password: String::new(),
        }
    }
}

impl GraphConfig {
    /// Read connection settings from `MAILGRAPH_GRAPH_URI`,
    /// `MAILGRAPH_GRAPH_USER`, and `MAILGRAPH_GRAPH_PASSWORD`, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: std::env::var("MAILGRAPH_GRAPH_URI").unwrap_or(defaults.uri),
            user: std::env::var("MAILGRAPH_GRAPH_USER").unwrap_or(defaults.user),
            password: std::env::var("MAILGRAPH_GRAPH_PASSWORD").unwrap_or(defaults.password),
        }
    }
}
