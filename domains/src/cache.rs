// Process-local key/value cache with a fixed time-to-live. Reads past the
// TTL are misses; every insert restarts the clock for its key. Invalidation
// is explicit and per key; there is no persistence.
use moka::sync::Cache;
use std::time::Duration;

const CAPACITY: u64 = 10_000;

pub struct TtlCache<T: Clone + Send + Sync + 'static> {
    cache: Cache<String, T>,
}

impl<T: Clone + Send + Sync + 'static> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(CAPACITY)
            .time_to_live(ttl)
            .build();

        TtlCache { cache }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: &str, value: T) {
        self.cache.insert(key.to_string(), value);
    }

    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
    }
}
