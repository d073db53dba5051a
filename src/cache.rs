//! Route resolution caching
//!
//! This module provides caching to avoid repeated linear scans over the
//! route table for paths that resolve frequently, with LRU eviction.
//! Only successful resolutions are cached; a path with no matching route is
//! re-scanned every time. Any registration change invalidates the cache.

use crate::route::RouteRef;
use crate::trace_log;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// Cache performance statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Resolution cache with LRU eviction
///
/// Keys are normalized paths; values are the route handles that resolved.
/// Default capacity: 1000 entries.
pub struct ResolutionCache<V> {
    entries: LruCache<String, RouteRef<V>>,
    stats: CacheStats,
}

impl<V> ResolutionCache<V> {
    const DEFAULT_CAPACITY: usize = 1000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).expect("Cache capacity must be non-zero");
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a cached resolution for a normalized path
    pub fn get(&mut self, path: &str) -> Option<RouteRef<V>> {
        if let Some(route) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Resolution cache hit for path: '{}'", path);
            Some(route.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Resolution cache miss for path: '{}'", path);
            None
        }
    }

    /// Record a successful resolution
    pub fn put(&mut self, path: String, route: RouteRef<V>) {
        trace_log!("Caching resolution '{}' for path '{}'", route.path(), path);
        self.entries.push(path, route);
    }

    /// Drop every entry; called whenever the route table changes
    pub fn clear(&mut self) {
        trace_log!("Clearing resolution cache");
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for ResolutionCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ResolutionCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("len", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}
