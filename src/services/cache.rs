use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use crate::models::{CompatibilityScore, ScoringWeights};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache capacity must be greater than zero")]
    ZeroCapacity,
}

/// Cache key for a pair of profiles scored under one set of weights
///
/// Mutual scores are symmetric, so `(a, b)` and `(b, a)` share a key.
/// Matchers with different weights can share a cache without seeing each
/// other's scores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    low: String,
    high: String,
    weights: ScoringWeights,
}

impl CacheKey {
    /// Key for a pair of profile ids; `None` when either id is empty
    pub fn pair(a: &str, b: &str, weights: &ScoringWeights) -> Option<Self> {
        if a.is_empty() || b.is_empty() {
            return None;
        }
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Some(Self {
            low: low.to_string(),
            high: high.to_string(),
            weights: *weights,
        })
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compat:{}:{}", self.low, self.high)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// In-memory LRU memo of mutual compatibility scores
///
/// Only valid while the cached profiles stay unchanged; call [`clear`]
/// after reloading profile data.
///
/// [`clear`]: ScoreCache::clear
pub struct ScoreCache {
    entries: Mutex<LruCache<CacheKey, CompatibilityScore>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ScoreCache {
    /// Create a new cache holding up to `capacity` pairs
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CacheError::ZeroCapacity)?;

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Get a cached score, counting the hit or miss
    pub fn get(&self, key: &CacheKey) -> Option<CompatibilityScore> {
        let cached = self
            .entries
            .lock()
            .ok()
            .and_then(|mut entries| entries.get(key).copied());

        match cached {
            Some(score) => {
                tracing::trace!("Score cache hit: {}", key);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(score)
            }
            None => {
                tracing::trace!("Score cache miss: {}", key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: CacheKey, score: CompatibilityScore) {
        // A poisoned lock just means we stop memoizing
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(key, score);
        }
    }

    /// Return the cached score for the pair or compute and store it
    ///
    /// Failed computations are not cached.
    pub fn get_or_compute<E, F>(
        &self,
        a: &str,
        b: &str,
        weights: &ScoringWeights,
        compute: F,
    ) -> Result<CompatibilityScore, E>
    where
        F: FnOnce() -> Result<CompatibilityScore, E>,
    {
        let Some(key) = CacheKey::pair(a, b, weights) else {
            return compute();
        };

        if let Some(score) = self.get(&key) {
            return Ok(score);
        }

        let score = compute()?;
        self.insert(key, score);
        Ok(score)
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        let (len, capacity) = self
            .entries
            .lock()
            .map(|entries| (entries.len(), entries.cap().get()))
            .unwrap_or((0, 0));

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len,
            capacity,
        }
    }
}

impl fmt::Debug for ScoreCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreCache")
            .field("stats", &self.stats())
            .finish()
    }
}
