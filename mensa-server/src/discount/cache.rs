//! Discount group list cache
//!
//! Holds the last successfully fetched group list together with the instant
//! it was populated. The pair is always replaced as one value, never patched.

use parking_lot::RwLock;
use shared::models::DiscountGroup;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default staleness window
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    groups: Arc<Vec<DiscountGroup>>,
    populated_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entry: Option<CacheEntry>,
    /// Bumped on every invalidation; a fetch started under an older
    /// generation must not populate the cache.
    generation: u64,
}

/// Process-wide discount group cache
#[derive(Debug)]
pub struct DiscountGroupCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl DiscountGroupCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached list if populated and younger than the staleness window
    pub fn get_fresh(&self, now: Instant) -> Option<Arc<Vec<DiscountGroup>>> {
        let state = self.state.read();
        let entry = state.entry.as_ref()?;
        if now.saturating_duration_since(entry.populated_at) < self.ttl {
            Some(Arc::clone(&entry.groups))
        } else {
            None
        }
    }

    /// Generation to pass back to [`store`](Self::store) after a fetch
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Replace the cached list.
    ///
    /// Returns `false` (and leaves the cache untouched) when the cache was
    /// invalidated after `generation` was read.
    pub fn store(
        &self,
        groups: Arc<Vec<DiscountGroup>>,
        populated_at: Instant,
        generation: u64,
    ) -> bool {
        let mut state = self.state.write();
        if state.generation != generation {
            return false;
        }
        state.entry = Some(CacheEntry {
            groups,
            populated_at,
        });
        true
    }

    /// Drop the cached list so the next lookup re-fetches
    pub fn invalidate(&self) {
        let mut state = self.state.write();
        state.entry = None;
        state.generation = state.generation.wrapping_add(1);
    }

    pub fn is_populated(&self) -> bool {
        self.state.read().entry.is_some()
    }
}

impl Default for DiscountGroupCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
