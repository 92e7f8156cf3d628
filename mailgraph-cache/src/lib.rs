//! # mailgraph-cache
//!
//! Two pieces of shared per-process state: a TTL-keyed memoization map for
//! expensive store calls, and the lazily-created singleton Graph Store
//! handle. Both are safe for concurrent callers.

mod connection;
mod ttl_cache;

pub use connection::GraphConnectionManager;
pub use ttl_cache::{cache_key, TtlCache};
