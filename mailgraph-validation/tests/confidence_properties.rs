//! Property tests for the confidence policy.

use proptest::prelude::*;

use mailgraph_core::models::Confidence;
use mailgraph_validation::{ConfidenceValidator, VendorCatalog};

proptest! {
    /// Any text containing "<vendor> announces <product>" validates at
    /// Medium or better — never Low, never None.
    #[test]
    fn announces_is_at_least_medium(
        vendor in "[a-z][a-z0-9]{2,12}",
        product in "[a-z][a-z0-9]{2,12}",
    ) {
        let validator = ConfidenceValidator::new(VendorCatalog::default());
        let text = format!("Today {vendor} announces {product} for everyone.");
        let confidence = validator.validate(&vendor, &product, Some(&text));
        prop_assert!(confidence >= Some(Confidence::Medium), "got {confidence:?}");
    }

    /// Same-sentence co-occurrence never comes back as None.
    #[test]
    fn co_occurrence_is_never_none(
        vendor in "[a-z][a-z0-9]{2,12}",
        product in "[a-z][a-z0-9]{2,12}",
    ) {
        let validator = ConfidenceValidator::new(VendorCatalog::default());
        let text = format!("note on {vendor} and {product} together");
        prop_assert!(validator.validate(&vendor, &product, Some(&text)).is_some());
    }
}
