use serde::{Deserialize, Serialize};

/// One content-type label and the keywords that map to it. Groups are
/// checked in order; the first keyword hit wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeKeywordGroup {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Curated keyword lists for the filter extractor. Checked in fixed
/// priority order: vendor before product before type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub vendors: Vec<String>,
    pub products: Vec<String>,
    pub type_keywords: Vec<TypeKeywordGroup>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        fn group(label: &str, keywords: &[&str]) -> TypeKeywordGroup {
            TypeKeywordGroup {
                label: label.to_string(),
                keywords: strings(keywords),
            }
        }

        Self {
            vendors: strings(&[
                "hashicorp",
                "palo alto",
                "google",
                "aws",
                "amazon",
                "microsoft",
                "dell",
                "ibm",
            ]),
            products: strings(&[
                "vault", "terraform", "consul", "nomad", "boundary", "waypoint", "packer",
            ]),
            type_keywords: vec![
                group("security", &["security", "vulnerability", "patch", "vulnerabilit"]),
                group("webinar", &["webinar", "workshop", "session"]),
                group("announcement", &["announcement", "news", "release"]),
                group("update", &["update", "upgrade", "new version"]),
                group("event", &["event", "conference", "meetup"]),
            ],
        }
    }
}
