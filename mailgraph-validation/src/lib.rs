//! # mailgraph-validation
//!
//! Decides, at graph-write time, whether a vendor↔product OFFERS edge
//! should exist and at what confidence. Implemented once: catalog match →
//! High, authorship pattern → Medium, same-sentence co-occurrence → Low,
//! no co-occurrence → None (no edge).

mod catalog;
mod validator;

pub use catalog::VendorCatalog;
pub use validator::ConfidenceValidator;
