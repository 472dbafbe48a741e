//! Per-action render cache.
//!
//! Caches the output of a component operation keyed by variant, action and a
//! caller-supplied key. On a miss the uncached body of the operation is invoked
//! under the name `<action>_without_caching`; template inference strips that suffix
//! again, so the cached and uncached paths render the same template.
//!
//! The cache is a concurrent map and can be shared between threads.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::constants::WITHOUT_CACHING_SUFFIX;
use crate::core::Result;

/// Cache key: (variant name, action, caller-supplied key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ActionKey {
    variant: String,
    action: String,
    key: String,
}

#[derive(Debug, Clone)]
struct CachedRender {
    output: String,
    stored_at: Instant,
}

/// Concurrent cache of rendered action output.
#[derive(Debug, Default)]
pub struct ActionCache {
    entries: DashMap<ActionKey, CachedRender>,
    ttl: Option<Duration>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ActionCache {
    /// Cache whose entries never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache whose entries are re-rendered once older than `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    /// Return the cached output, or call `render` with the uncached operation name
    /// and store its output.
    ///
    /// Errors from `render` are returned and nothing is stored.
    ///
    /// # Errors
    ///
    /// Whatever `render` returns.
    pub fn fetch<F>(&self, variant: &str, action: &str, key: &str, render: F) -> Result<String>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let cache_key = ActionKey {
            variant: variant.to_string(),
            action: action.to_string(),
            key: key.to_string(),
        };

        if let Some(entry) = self.entries.get(&cache_key) {
            let fresh = self.ttl.is_none_or(|ttl| entry.stored_at.elapsed() < ttl);
            if fresh {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Action cache hit for {}#{} [{}]", variant, action, key);
                return Ok(entry.output.clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let operation = format!("{action}{WITHOUT_CACHING_SUFFIX}");
        tracing::debug!("Action cache miss for {}#{} [{}], calling {}", variant, action, key, operation);

        let output = render(&operation)?;
        self.entries.insert(
            cache_key,
            CachedRender {
                output: output.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(output)
    }

    /// Drop every entry and reset the statistics.
    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// (hits, misses, hit rate in percent).
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        (hits, misses, hit_rate)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ComponentError;
    use std::cell::Cell;

    #[test]
    fn test_miss_then_hit() {
        let cache = ActionCache::new();
        let calls = Cell::new(0);
        let render = |op: &str| {
            calls.set(calls.get() + 1);
            Ok(format!("rendered by {op}"))
        };

        assert_eq!(
            cache.fetch("UsersComponent", "details", "7", render).unwrap(),
            "rendered by details_without_caching"
        );
        assert_eq!(
            cache.fetch("UsersComponent", "details", "7", render).unwrap(),
            "rendered by details_without_caching"
        );
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);

        let (hits, misses, rate) = cache.stats();
        assert_eq!((hits, misses), (1, 1));
        assert!((rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_keys_are_distinct() {
        let cache = ActionCache::new();
        cache.fetch("UsersComponent", "details", "1", |_| Ok("one".into())).unwrap();
        cache.fetch("UsersComponent", "details", "2", |_| Ok("two".into())).unwrap();
        cache.fetch("UsersComponent", "summary", "1", |_| Ok("three".into())).unwrap();
        cache.fetch("PostsComponent", "details", "1", |_| Ok("four".into())).unwrap();
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = ActionCache::new();
        let result = cache.fetch("UsersComponent", "details", "1", |_| {
            Err(ComponentError::Inference {
                variant: "UsersComponent".into(),
            })
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entries_rerender() {
        let cache = ActionCache::with_ttl(Duration::ZERO);
        let calls = Cell::new(0);
        let render = |_: &str| {
            calls.set(calls.get() + 1);
            Ok("x".to_string())
        };
        cache.fetch("UsersComponent", "details", "1", render).unwrap();
        cache.fetch("UsersComponent", "details", "1", render).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_clear() {
        let cache = ActionCache::new();
        cache.fetch("UsersComponent", "details", "1", |_| Ok("x".into())).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().0 + cache.stats().1, 0);
    }
}
