//! Keyword and pattern extraction from free-text queries: curated lists in
//! fixed priority order (vendor before product before type), generic
//! `from X` / `about X` fallbacks, and phrase → day-span time windows.

use regex::Regex;
use tracing::debug;

use mailgraph_core::config::ExtractorConfig;
use mailgraph_core::models::QueryFilters;

/// Phrase → day-span mappings, first match wins. Explicit phrases come
/// before the bare "recent" default.
const TIME_PATTERNS: &[(&str, u32)] = &[
    ("past week", 7),
    ("last week", 7),
    ("past month", 30),
    ("last month", 30),
    ("past year", 365),
    ("last year", 365),
    ("recent", 30),
];

/// Generic words excluded from the `from X` fallback.
const STOP_WORDS: &[&str] = &["the", "all", "any", "recent"];

/// Extracts structured filters from a free-text query.
pub struct FilterExtractor {
    config: ExtractorConfig,
    from_pattern: Regex,
    about_pattern: Regex,
}

impl FilterExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            from_pattern: Regex::new(r"from\s+(\w+)(?:\s|$)").expect("static pattern"),
            about_pattern: Regex::new(r"about\s+(\w+)(?:\s|$)").expect("static pattern"),
        }
    }

    /// Extract vendor/product/type filters and a time window from `query`.
    ///
    /// Pure and infallible: anything that does not match is simply left
    /// empty.
    pub fn extract(&self, query: &str) -> QueryFilters {
        let query_lower = query.to_lowercase();

        let day_span = TIME_PATTERNS
            .iter()
            .find(|(phrase, _)| query_lower.contains(phrase))
            .map(|&(_, days)| days);

        let vendor = self
            .config
            .vendors
            .iter()
            .find(|v| query_lower.contains(v.as_str()))
            .cloned()
            .or_else(|| self.pattern_capture(&self.from_pattern, &query_lower, STOP_WORDS));

        let product = self
            .config
            .products
            .iter()
            .find(|p| query_lower.contains(p.as_str()))
            .cloned()
            .or_else(|| self.pattern_capture(&self.about_pattern, &query_lower, &[]));

        let content_type = self
            .config
            .type_keywords
            .iter()
            .find(|group| group.keywords.iter().any(|kw| query_lower.contains(kw.as_str())))
            .map(|group| group.label.clone());

        let filters = QueryFilters {
            vendor,
            product,
            content_type,
            day_span,
        };
        debug!(?filters, "extracted query filters");
        filters
    }

    fn pattern_capture(&self, pattern: &Regex, query: &str, stop_words: &[&str]) -> Option<String> {
        let captured = pattern.captures(query)?.get(1)?.as_str();
        if stop_words.contains(&captured) {
            return None;
        }
        Some(captured.to_string())
    }
}

impl Default for FilterExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(query: &str) -> QueryFilters {
        FilterExtractor::default().extract(query)
    }

    #[test]
    fn recent_security_updates_from_hashicorp() {
        let filters = extract("recent security updates from hashicorp");
        assert_eq!(filters.vendor.as_deref(), Some("hashicorp"));
        assert_eq!(filters.content_type.as_deref(), Some("security"));
        assert_eq!(filters.day_span, Some(30));
        assert_eq!(filters.product, None);
    }

    #[test]
    fn explicit_window_beats_recent_default() {
        assert_eq!(extract("updates from the past week").day_span, Some(7));
        assert_eq!(extract("anything from last year").day_span, Some(365));
    }

    #[test]
    fn known_product_keyword_wins_over_about_pattern() {
        let filters = extract("news about vault pricing");
        assert_eq!(filters.product.as_deref(), Some("vault"));
    }

    #[test]
    fn about_pattern_catches_unknown_products() {
        let filters = extract("emails about widgets");
        assert_eq!(filters.product.as_deref(), Some("widgets"));
    }

    #[test]
    fn from_pattern_catches_unknown_vendors() {
        let filters = extract("updates from acme last month");
        assert_eq!(filters.vendor.as_deref(), Some("acme"));
        assert_eq!(filters.day_span, Some(30));
    }

    #[test]
    fn stop_words_are_not_vendors() {
        assert_eq!(extract("updates from the mailing list").vendor, None);
        assert_eq!(extract("everything from all vendors").vendor, None);
    }

    #[test]
    fn empty_query_extracts_nothing() {
        assert_eq!(extract(""), QueryFilters::default());
    }

    #[test]
    fn vendor_and_product_can_both_match() {
        let filters = extract("terraform webinar from hashicorp");
        assert_eq!(filters.vendor.as_deref(), Some("hashicorp"));
        assert_eq!(filters.product.as_deref(), Some("terraform"));
        assert_eq!(filters.content_type.as_deref(), Some("webinar"));
    }
}
