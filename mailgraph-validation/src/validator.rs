//! The validation policy itself. Checks run strongest-first and stop at
//! the first hit; the returned level is the candidate confidence, which
//! the graph layer merges with any previously persisted level (keep max).

use regex::Regex;
use tracing::debug;

use mailgraph_core::models::Confidence;

use crate::catalog::VendorCatalog;

/// Authorship patterns expressing vendor→product attribution. `{v}` and
/// `{p}` are replaced with the escaped, lowercased terms.
const AUTHORSHIP_PATTERNS: &[&str] = &[
    r"{v}.*?(?:announces|releases|offers|launches).*?{p}",
    r"{p}.*?(?:by|from|offered by).*?{v}",
    r"{v}'s.*?{p}",
];

/// Validates vendor↔product relationships against the catalog and the
/// document text.
pub struct ConfidenceValidator {
    catalog: VendorCatalog,
}

impl ConfidenceValidator {
    pub fn new(catalog: VendorCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &VendorCatalog {
        &self.catalog
    }

    /// Validate a (vendor, product) pair.
    ///
    /// - `High`: the pair is in the curated catalog, regardless of text.
    /// - `Medium`: an authorship pattern matches the document text.
    /// - `Low`: vendor and product co-occur in one sentence.
    /// - `None`: no co-occurrence at all; no OFFERS edge is warranted.
    pub fn validate(
        &self,
        vendor: &str,
        product: &str,
        document_text: Option<&str>,
    ) -> Option<Confidence> {
        if self.catalog.contains(vendor, product) {
            return Some(Confidence::High);
        }
        document_text.and_then(|text| text_confidence(text, vendor, product))
    }
}

/// Confidence derivable from the document text alone.
fn text_confidence(text: &str, vendor: &str, product: &str) -> Option<Confidence> {
    let text_lower = text.to_lowercase();
    let vendor_lower = regex::escape(&vendor.to_lowercase());
    let product_lower = regex::escape(&product.to_lowercase());

    for pattern in AUTHORSHIP_PATTERNS {
        let pattern = pattern
            .replace("{v}", &vendor_lower)
            .replace("{p}", &product_lower);
        match Regex::new(&pattern) {
            Ok(re) if re.is_match(&text_lower) => return Some(Confidence::Medium),
            Ok(_) => {}
            Err(e) => debug!(pattern, error = %e, "skipping unparseable authorship pattern"),
        }
    }

    let vendor_plain = vendor.to_lowercase();
    let product_plain = product.to_lowercase();
    let co_occur = text_lower
        .split(['.', '!', '?'])
        .any(|sentence| sentence.contains(&vendor_plain) && sentence.contains(&product_plain));
    if co_occur {
        return Some(Confidence::Low);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ConfidenceValidator {
        ConfidenceValidator::new(VendorCatalog::builtin())
    }

    #[test]
    fn catalog_pair_is_high_regardless_of_text() {
        let v = validator();
        assert_eq!(v.validate("hashicorp", "vault", None), Some(Confidence::High));
        assert_eq!(
            v.validate("hashicorp", "vault", Some("unrelated text")),
            Some(Confidence::High)
        );
    }

    #[test]
    fn announces_pattern_is_medium() {
        let v = validator();
        let text = "Today acme announces widget 2.0, generally available.";
        assert_eq!(v.validate("acme", "widget", Some(text)), Some(Confidence::Medium));
    }

    #[test]
    fn possessive_pattern_is_medium() {
        let v = validator();
        let text = "We are excited about Acme's widget rollout.";
        assert_eq!(v.validate("acme", "widget", Some(text)), Some(Confidence::Medium));
    }

    #[test]
    fn reversed_attribution_is_medium() {
        let v = validator();
        let text = "Widget, offered by Acme, is now in beta.";
        assert_eq!(v.validate("acme", "widget", Some(text)), Some(Confidence::Medium));
    }

    #[test]
    fn same_sentence_co_occurrence_is_low() {
        let v = validator();
        let text = "The acme team demoed widget at the conference. Other news followed.";
        assert_eq!(v.validate("acme", "widget", Some(text)), Some(Confidence::Low));
    }

    #[test]
    fn cross_sentence_mention_is_none() {
        let v = validator();
        let text = "Acme raised a round. Meanwhile widget shipped elsewhere.";
        assert_eq!(v.validate("acme", "widget", Some(text)), None);
    }

    #[test]
    fn no_text_and_no_catalog_is_none() {
        let v = validator();
        assert_eq!(v.validate("acme", "widget", None), None);
    }

    #[test]
    fn regex_metacharacters_in_names_are_escaped() {
        let v = validator();
        let text = "c++ tools by acme (beta). nothing else.";
        assert_eq!(v.validate("acme", "c++ tools", Some(text)), Some(Confidence::Medium));
    }
}
