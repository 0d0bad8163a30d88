use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Keyed in-memory cache whose entries expire after a fixed time-to-live.
pub(crate) struct TtlCache<V> {
    entries: HashMap<String, (V, Instant)>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<V> {
        if let Some((value, stored_at)) = self.entries.get(key) {
            if stored_at.elapsed() < self.ttl {
                return Some(value.clone());
            }
        }

        None
    }

    pub(crate) fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), (value, Instant::now()));
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
