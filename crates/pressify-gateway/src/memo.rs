//! Short-lived response memoization.
//!
//! Optional TTL cache in front of the transport, keyed by the query document
//! and its variables. Only successful responses are stored. Disabled by
//! default; the gateway's contract without it is one network round-trip per
//! call.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

/// TTL-bounded memo cache for GraphQL `data` payloads.
#[derive(Debug)]
pub struct MemoCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Value)>>,
}

impl MemoCache {
    /// Create a cache with the given entry time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cache key for a query and its variables.
    pub fn key(query: &str, variables: &Value) -> String {
        format!("{query}\u{1f}{variables}")
    }

    /// Look up a fresh entry, dropping it if expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some((inserted, value)) if inserted.elapsed() < self.ttl => {
                trace!("memo cache hit");
                Some(value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a response, pruning expired entries while holding the lock.
    pub fn insert(&self, key: String, value: Value) {
        let mut entries = self.entries.lock();
        let ttl = self.ttl;
        entries.retain(|_, (inserted, _)| inserted.elapsed() < ttl);
        entries.insert(key, (Instant::now(), value));
    }

    /// Number of live entries (expired ones may still be counted until the
    /// next insert or lookup touches them).
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
