use serde::{Deserialize, Serialize};

use super::defaults;

/// Cache subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for general cached graph reads.
    pub default_ttl_secs: u64,
    /// TTL for vendor-product list reads.
    pub vendor_products_ttl_secs: u64,
    /// TTL for catalog/keyword lists, which change rarely.
    pub catalog_ttl_secs: u64,
    /// Expired entries are swept every Nth insert.
    pub sweep_every: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            vendor_products_ttl_secs: defaults::DEFAULT_VENDOR_PRODUCTS_TTL_SECS,
            catalog_ttl_secs: defaults::DEFAULT_CATALOG_TTL_SECS,
            sweep_every: defaults::DEFAULT_CACHE_SWEEP_EVERY,
        }
    }
}
