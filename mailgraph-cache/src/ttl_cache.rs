//! TTL-keyed memoization over a shared concurrent map.
//!
//! Per-entry TTLs (different call classes use different windows), expired
//! entries swept every Nth insert so cleanup cost stays amortized and
//! memory bounded. Tracks hits/misses.

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use mailgraph_core::config::defaults::DEFAULT_CACHE_SWEEP_EVERY;
use mailgraph_core::errors::MailgraphResult;

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Shared TTL cache. Values are row-shaped JSON; keys come from
/// [`cache_key`] so two logically distinct calls never collide.
pub struct TtlCache {
    entries: DashMap<String, CacheEntry>,
    inserts: AtomicUsize,
    sweep_every: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TtlCache {
    pub fn new(sweep_every: usize) -> Self {
        Self {
            entries: DashMap::new(),
            inserts: AtomicUsize::new(0),
            sweep_every: sweep_every.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get an unexpired value. An expired entry counts as a miss and is
    /// removed on the spot.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        // The read guard must drop before the remove below touches the map.
        let (hit, expired) = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => (Some(entry.value.clone()), false),
            Some(_) => (None, true),
            None => (None, false),
        };
        if expired {
            self.entries.remove(key);
        }
        match &hit {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        hit
    }

    /// Insert with a per-entry TTL. Every `sweep_every`th insert also
    /// sweeps expired entries.
    pub fn insert(&self, key: String, value: Value, ttl: Duration) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        let count = self.inserts.fetch_add(1, Ordering::Relaxed) + 1;
        if count % self.sweep_every == 0 {
            self.sweep();
        }
    }

    /// Memoized call: runs `populate` only when no unexpired entry exists
    /// for `key`. Only successful results are cached, so a failed call is
    /// retried by the next caller and cancellation cannot publish partial
    /// state.
    pub async fn get_or_insert_with<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        populate: F,
    ) -> MailgraphResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MailgraphResult<Value>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = populate().await?;
        self.insert(key.to_string(), value.clone(), ttl);
        Ok(value)
    }

    fn sweep(&self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, "swept expired cache entries");
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let h = self.hits() as f64;
        let m = self.misses() as f64;
        if h + m == 0.0 {
            0.0
        } else {
            h / (h + m)
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SWEEP_EVERY)
    }
}

/// Build a cache key from a function name and its serialized arguments.
pub fn cache_key<A: Serialize>(func: &str, args: &A) -> String {
    let args = serde_json::to_string(args).unwrap_or_else(|_| "null".to_string());
    format!("{func}:{args}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn distinct_arguments_never_collide() {
        let a = cache_key("vendor_products", &("hashicorp", 5));
        let b = cache_key("vendor_products", &("hashicorp", 6));
        let c = cache_key("related_vendors", &("hashicorp", 5));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn second_call_within_ttl_hits_cache() {
        let cache = TtlCache::default();
        let calls = AtomicU32::new(0);
        for _ in 0..2 {
            let value = cache
                .get_or_insert_with("k", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Value::from(42))
                })
                .await
                .unwrap();
            assert_eq!(value, Value::from(42));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[tokio::test]
    async fn expired_entry_repopulates() {
        let cache = TtlCache::default();
        let calls = AtomicU32::new(0);
        let populate = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from("v"))
        };
        cache
            .get_or_insert_with("k", Duration::from_millis(10), populate)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        cache
            .get_or_insert_with("k", Duration::from_millis(10), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Value::from("v"))
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_population_is_not_cached() {
        let cache = TtlCache::default();
        let result = cache
            .get_or_insert_with("k", Duration::from_secs(60), || async {
                Err(mailgraph_core::errors::StoreError::GraphUnavailable {
                    reason: "down".into(),
                }
                .into())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn sweep_removes_expired_entries() {
        let cache = TtlCache::new(2);
        cache.insert("a".into(), Value::Null, Duration::from_millis(0));
        // Second insert triggers the sweep; "a" has already expired.
        cache.insert("b".into(), Value::Null, Duration::from_secs(60));
        assert_eq!(cache.entry_count(), 1);
    }
}
