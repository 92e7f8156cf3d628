//! # mailgraph-extract
//!
//! Turns free-text queries into a structured filter set. Pure and
//! synchronous: no I/O, never fails. Absence of a match leaves a field
//! empty.

mod extractor;

pub use extractor::FilterExtractor;
