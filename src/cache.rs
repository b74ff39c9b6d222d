// src/cache.rs

//! Time-based result cache.
//!
//! Entries expire purely by elapsed time against a fixed TTL; the data
//! source never signals eviction. The clock is injected so tests can expire
//! entries without sleeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Clock abstraction for cache expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached payload with its creation timestamp.
struct CacheEntry<T> {
    payload: T,
    created_at: DateTime<Utc>,
}

/// A process-local map with time-to-live expiry.
///
/// The lock is held only across map access, never across an await point, so
/// concurrent readers on a multi-threaded runtime cannot deadlock; duplicate
/// fetches for a key that is being resolved are tolerated, not guarded.
pub struct TtlCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> TtlCache<T> {
    /// Create a cache with the given TTL in seconds.
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
        }
    }

    /// Return the cached payload for `key` if it has not expired.
    ///
    /// An expired entry is removed on the way out.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if now - entry.created_at < self.ttl => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a payload under `key`, stamping it with the current time.
    pub fn insert(&self, key: impl Into<String>, payload: T) {
        let entry = CacheEntry {
            payload,
            created_at: self.clock.now(),
        };
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.into(), entry);
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex as StdMutex;

    use super::*;

    /// Manually advanced clock for deterministic expiry tests.
    pub struct FakeClock {
        now: StdMutex<DateTime<Utc>>,
    }

    impl FakeClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: StdMutex::new(start),
            }
        }

        pub fn advance(&self, seconds: i64) {
            let mut now = self.now.lock().unwrap();
            *now += Duration::seconds(seconds);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }
}
