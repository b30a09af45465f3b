//! Value-keyed memoization of merge and compose results.
//!
//! Callers typically rebuild equal-valued highlight and emphasis collections
//! on every render. Entries are therefore keyed by the *contents* of the
//! inputs (plus the options that affect the result), never by address. A
//! lookup hashes the borrowed inputs and confirms a hit with a full equality
//! check against the stored copy, so a hash collision can never return a
//! result computed for different inputs.
//!
//! Eviction is least-recently-used over a linear scan, which is fine for the
//! tens of entries this is meant to hold.

use crate::color::Rgba;
use crate::compose::compose_merged;
use crate::config::{AnnotateOptions, TouchPolicy};
use crate::error::Result;
use crate::event::{LogLevel, emit_log_with};
use crate::merge::{MergedHighlight, merge_highlights_with};
use crate::segment::StyledSegment;
use crate::span::{Emphasis, Highlight};
use crate::style::StylePolicy;
use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Options that change merge/compose output and so belong in the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Settings {
    touch_policy: TouchPolicy,
    default_highlight_color: Rgba,
    style_policy: StylePolicy,
}

impl From<&AnnotateOptions> for Settings {
    fn from(options: &AnnotateOptions) -> Self {
        Self {
            touch_policy: options.touch_policy,
            default_highlight_color: options.default_highlight_color,
            style_policy: options.style_policy,
        }
    }
}

/// A borrowed lookup key that can be compared against, and turned into, the
/// owned key stored in the cache.
trait LookupKey<K>: Hash {
    fn matches(&self, key: &K) -> bool;
    fn to_key(&self) -> K;
}

struct MergeKey {
    highlights: Vec<Highlight>,
    settings: Settings,
}

#[derive(Hash)]
struct MergeQuery<'a> {
    highlights: &'a [Highlight],
    settings: Settings,
}

impl LookupKey<MergeKey> for MergeQuery<'_> {
    fn matches(&self, key: &MergeKey) -> bool {
        self.settings == key.settings && self.highlights == key.highlights.as_slice()
    }

    fn to_key(&self) -> MergeKey {
        MergeKey {
            highlights: self.highlights.to_vec(),
            settings: self.settings,
        }
    }
}

struct ComposeKey {
    highlights: Vec<Highlight>,
    emphases: Vec<Emphasis>,
    settings: Settings,
}

#[derive(Hash)]
struct ComposeQuery<'a> {
    highlights: &'a [Highlight],
    emphases: &'a [Emphasis],
    settings: Settings,
}

impl LookupKey<ComposeKey> for ComposeQuery<'_> {
    fn matches(&self, key: &ComposeKey) -> bool {
        self.settings == key.settings
            && self.highlights == key.highlights.as_slice()
            && self.emphases == key.emphases.as_slice()
    }

    fn to_key(&self) -> ComposeKey {
        ComposeKey {
            highlights: self.highlights.to_vec(),
            emphases: self.emphases.to_vec(),
            settings: self.settings,
        }
    }
}

struct Entry<K, V> {
    epoch: u64,
    key: K,
    value: Arc<[V]>,
}

struct Memo<K, V> {
    buckets: HashMap<u64, Vec<Entry<K, V>>>,
    len: usize,
    epoch: u64,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            len: 0,
            epoch: 0,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K, V> Memo<K, V> {
    fn get(&mut self, hash: u64, query: &impl LookupKey<K>) -> Option<Arc<[V]>> {
        self.epoch += 1;
        let epoch = self.epoch;
        let found = self
            .buckets
            .get_mut(&hash)
            .and_then(|bucket| bucket.iter_mut().find(|entry| query.matches(&entry.key)))
            .map(|entry| {
                entry.epoch = epoch;
                Arc::clone(&entry.value)
            });
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    fn insert(&mut self, hash: u64, query: &impl LookupKey<K>, value: Arc<[V]>, capacity: usize) {
        // Another thread may have filled the slot while we computed.
        if let Some(bucket) = self.buckets.get(&hash) {
            if bucket.iter().any(|entry| query.matches(&entry.key)) {
                return;
            }
        }
        while self.len >= capacity && self.evict_oldest() {}
        self.epoch += 1;
        self.buckets.entry(hash).or_default().push(Entry {
            epoch: self.epoch,
            key: query.to_key(),
            value,
        });
        self.len += 1;
    }

    fn evict_oldest(&mut self) -> bool {
        let oldest = self
            .buckets
            .iter()
            .flat_map(|(hash, bucket)| {
                bucket
                    .iter()
                    .enumerate()
                    .map(move |(idx, entry)| (entry.epoch, *hash, idx))
            })
            .min();
        let Some((_, hash, idx)) = oldest else {
            return false;
        };
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            bucket.swap_remove(idx);
            if bucket.is_empty() {
                self.buckets.remove(&hash);
            }
        }
        self.len -= 1;
        true
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

/// Cache hit/miss counters and current size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub merge_hits: u64,
    pub merge_misses: u64,
    pub compose_hits: u64,
    pub compose_misses: u64,
    pub entries: usize,
}

/// Thread-safe memo table for [`merge_highlights_with`] and
/// [`compose_with`](crate::compose_with).
///
/// Entries are immutable once inserted; results are shared as `Arc<[T]>`.
/// Errors are never cached.
pub struct ResultCache {
    capacity: usize,
    hasher: RandomState,
    merges: Mutex<Memo<MergeKey, MergedHighlight>>,
    composes: Mutex<Memo<ComposeKey, StyledSegment>>,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(AnnotateOptions::default().cache_capacity)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Entries are immutable once inserted, so a poisoned table is still valid.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ResultCache {
    /// Create a cache holding at most `capacity` results per function.
    ///
    /// A capacity of zero disables memoization entirely.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hasher: RandomState::new(),
            merges: Mutex::new(Memo::default()),
            composes: Mutex::new(Memo::default()),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Memoized [`merge_highlights_with`].
    pub fn merge(
        &self,
        highlights: &[Highlight],
        options: &AnnotateOptions,
    ) -> Result<Arc<[MergedHighlight]>> {
        if self.capacity == 0 {
            return merge_highlights_with(highlights, options).map(Arc::from);
        }

        let query = MergeQuery {
            highlights,
            settings: Settings::from(options),
        };
        let hash = self.hasher.hash_one(&query);
        let hit = lock(&self.merges).get(hash, &query);
        if let Some(hit) = hit {
            emit_log_with(LogLevel::Debug, || {
                format!("merge cache hit for {} highlights", highlights.len())
            });
            return Ok(hit);
        }
        emit_log_with(LogLevel::Debug, || {
            format!("merge cache miss for {} highlights", highlights.len())
        });

        let value: Arc<[MergedHighlight]> = merge_highlights_with(highlights, options)?.into();
        lock(&self.merges).insert(hash, &query, Arc::clone(&value), self.capacity);
        Ok(value)
    }

    /// Memoized [`compose_with`](crate::compose_with).
    ///
    /// On a miss the merge step goes through [`ResultCache::merge`] as well.
    pub fn compose(
        &self,
        highlights: &[Highlight],
        emphases: &[Emphasis],
        options: &AnnotateOptions,
    ) -> Result<Arc<[StyledSegment]>> {
        if self.capacity == 0 {
            let merged = merge_highlights_with(highlights, options)?;
            return compose_merged(&merged, emphases, options.style_policy).map(Arc::from);
        }

        let query = ComposeQuery {
            highlights,
            emphases,
            settings: Settings::from(options),
        };
        let hash = self.hasher.hash_one(&query);
        let hit = lock(&self.composes).get(hash, &query);
        if let Some(hit) = hit {
            emit_log_with(LogLevel::Debug, || {
                format!(
                    "compose cache hit for {} highlights, {} emphases",
                    highlights.len(),
                    emphases.len()
                )
            });
            return Ok(hit);
        }
        emit_log_with(LogLevel::Debug, || {
            format!(
                "compose cache miss for {} highlights, {} emphases",
                highlights.len(),
                emphases.len()
            )
        });

        let merged = self.merge(highlights, options)?;
        let value: Arc<[StyledSegment]> =
            compose_merged(&merged, emphases, options.style_policy)?.into();
        lock(&self.composes).insert(hash, &query, Arc::clone(&value), self.capacity);
        Ok(value)
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let merges = lock(&self.merges);
        let composes = lock(&self.composes);
        CacheStats {
            merge_hits: merges.hits,
            merge_misses: merges.misses,
            compose_hits: composes.hits,
            compose_misses: composes.misses,
            entries: merges.len + composes.len,
        }
    }

    /// Drop every cached result. Counters are kept.
    pub fn clear(&self) {
        lock(&self.merges).clear();
        lock(&self.composes).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose_with;
    use crate::style::EmphasisStyle;

    fn highlights() -> Vec<Highlight> {
        vec![Highlight::new("a", 0, 5), Highlight::new("b", 3, 8)]
    }

    fn emphases() -> Vec<Emphasis> {
        vec![Emphasis::new(4, 10, EmphasisStyle::bold())]
    }

    #[test]
    fn equal_values_hit_across_fresh_allocations() {
        let cache = ResultCache::new(8);
        let options = AnnotateOptions::default();

        let first = cache.merge(&highlights(), &options).unwrap();
        let second = cache.merge(&highlights(), &options).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats();
        assert_eq!((stats.merge_hits, stats.merge_misses), (1, 1));
    }

    #[test]
    fn cached_equals_fresh_computation() {
        let cache = ResultCache::new(8);
        let options = AnnotateOptions::default();
        let fresh = compose_with(&highlights(), &emphases(), &options).unwrap();

        let cold = cache.compose(&highlights(), &emphases(), &options).unwrap();
        let warm = cache.compose(&highlights(), &emphases(), &options).unwrap();
        assert_eq!(&*cold, fresh.as_slice());
        assert_eq!(&*warm, fresh.as_slice());
        assert_eq!(cache.stats().compose_hits, 1);
    }

    #[test]
    fn different_values_never_hit() {
        let cache = ResultCache::new(8);
        let options = AnnotateOptions::default();
        cache.merge(&highlights(), &options).unwrap();

        let mut changed = highlights();
        changed[1].id = "c".into();
        let merged = cache.merge(&changed, &options).unwrap();
        assert_eq!(merged[0].id.as_str(), "c");

        let recolored = highlights()
            .into_iter()
            .map(|h| h.with_color(Rgba::RED))
            .collect::<Vec<_>>();
        let merged = cache.merge(&recolored, &options).unwrap();
        assert_eq!(merged[0].color, Rgba::RED);
        assert_eq!(cache.stats().merge_hits, 0);
    }

    #[test]
    fn options_are_part_of_the_key() {
        let cache = ResultCache::new(8);
        let touching = [Highlight::new("a", 0, 5), Highlight::new("b", 5, 9)];

        let separate = cache.merge(&touching, &AnnotateOptions::default()).unwrap();
        let fused = cache
            .merge(
                &touching,
                &AnnotateOptions::default().with_touch_policy(TouchPolicy::Merge),
            )
            .unwrap();
        assert_eq!(separate.len(), 2);
        assert_eq!(fused.len(), 1);
    }

    #[test]
    fn emphasis_order_is_part_of_the_key() {
        let cache = ResultCache::new(8);
        let options = AnnotateOptions::default();
        let forward = [
            Emphasis::new(0, 4, EmphasisStyle::bold()),
            Emphasis::new(2, 6, EmphasisStyle::italic()),
        ];
        let reversed = [forward[1].clone(), forward[0].clone()];

        let a = cache.compose(&[], &forward, &options).unwrap();
        let b = cache.compose(&[], &reversed, &options).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn lru_eviction() {
        let cache = ResultCache::new(2);
        let options = AnnotateOptions::default();
        let key = |n: usize| vec![Highlight::new("k", n, n + 1)];

        cache.merge(&key(1), &options).unwrap();
        cache.merge(&key(2), &options).unwrap();
        // Touch key1 so key2 becomes the oldest.
        cache.merge(&key(1), &options).unwrap();
        cache.merge(&key(3), &options).unwrap();
        assert_eq!(cache.stats().entries, 2);

        cache.merge(&key(1), &options).unwrap();
        assert_eq!(cache.stats().merge_hits, 2);
        cache.merge(&key(2), &options).unwrap();
        assert_eq!(cache.stats().merge_hits, 2, "key2 should have been evicted");
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = ResultCache::new(0);
        let options = AnnotateOptions::default();
        cache.compose(&highlights(), &emphases(), &options).unwrap();
        cache.compose(&highlights(), &emphases(), &options).unwrap();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = ResultCache::new(8);
        let options = AnnotateOptions::default();
        let bad = [Highlight::new("bad", 4, 1)];
        assert!(cache.merge(&bad, &options).is_err());
        assert!(cache.merge(&bad, &options).is_err());
        assert_eq!(cache.stats().entries, 0);
        assert_eq!(cache.stats().merge_hits, 0);
    }

    #[test]
    fn clear_drops_entries() {
        let cache = ResultCache::new(8);
        cache
            .compose(&highlights(), &emphases(), &AnnotateOptions::default())
            .unwrap();
        assert_eq!(cache.stats().entries, 2);
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(ResultCache::new(8));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache
                        .compose(&highlights(), &emphases(), &AnnotateOptions::default())
                        .map(|segments| segments.len())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(3));
        }
        assert_eq!(cache.stats().entries, 2);
    }
}
