use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mailgraph_core::errors::{MailgraphError, MailgraphResult};

/// Curated vendor → known-product mapping: the configuration source
/// consulted by confidence validation. Reloadable, but read-only at
/// query/validation time; callers cache it process-wide with a long TTL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorCatalog {
    pub vendors: BTreeMap<String, Vec<String>>,
}

impl VendorCatalog {
    /// Whether `(vendor, product)` is a known pair. Vendor names match by
    /// case-insensitive substring in either direction (a candidate
    /// "hashicorp inc" matches the known "hashicorp" and vice versa);
    /// products match exactly, case-insensitive.
    pub fn contains(&self, vendor: &str, product: &str) -> bool {
        let vendor_lower = vendor.to_lowercase();
        let product_lower = product.to_lowercase();

        self.vendors.iter().any(|(known_vendor, products)| {
            let known_lower = known_vendor.to_lowercase();
            let vendor_matches =
                vendor_lower.contains(&known_lower) || known_lower.contains(&vendor_lower);
            vendor_matches
                && products
                    .iter()
                    .any(|known_product| known_product.to_lowercase() == product_lower)
        })
    }

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

    /// Built-in catalog used when no config file is supplied.
    pub fn builtin() -> Self {
        let mut vendors = BTreeMap::new();
        vendors.insert(
            "hashicorp".to_string(),
            ["vault", "terraform", "consul", "nomad", "boundary", "waypoint", "packer"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        vendors.insert(
            "palo alto".to_string(),
            ["cortex", "prisma", "panorama"].iter().map(|s| s.to_string()).collect(),
        );
        Self { vendors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pair_matches() {
        let catalog = VendorCatalog::builtin();
        assert!(catalog.contains("hashicorp", "vault"));
    }

    #[test]
    fn vendor_matching_is_bidirectional_substring() {
        let catalog = VendorCatalog::builtin();
        assert!(catalog.contains("HashiCorp Inc", "terraform"));
        assert!(catalog.contains("hashi", "terraform"));
    }

    #[test]
    fn product_matching_is_exact() {
        let catalog = VendorCatalog::builtin();
        assert!(catalog.contains("hashicorp", "VAULT"));
        assert!(!catalog.contains("hashicorp", "vault enterprise"));
    }

    #[test]
    fn unknown_pairs_do_not_match() {
        let catalog = VendorCatalog::builtin();
        assert!(!catalog.contains("acme", "vault"));
        assert!(!catalog.contains("hashicorp", "prisma"));
    }

    #[test]
    fn loads_from_toml() {
        let catalog = VendorCatalog::from_toml_str(
            "[vendors]\nacme = [\"widget\", \"gadget\"]\n",
        )
        .unwrap();
        assert!(catalog.contains("acme", "widget"));
    }
}
