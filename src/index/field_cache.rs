use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use log::{debug, info, trace, warn};
use lru::LruCache;
use parking_lot::Mutex;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::index::ordinals::OrdinalArray;
use crate::storage::segment::{SegmentContext, SegmentId};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub segment: SegmentId,
    pub generation: u64,
    pub field: String,
}

/// Build slot for one key. Holding its lock is what serializes builds.
type Slot = Arc<Mutex<Option<Arc<OrdinalArray>>>>;

struct CacheState {
    // Finished arrays only; LRU eviction never touches a running build
    entries: LruCache<CacheKey, Arc<OrdinalArray>>,
    in_flight: HashMap<CacheKey, Slot>,
    // Newest generation per segment that still has entries or builds
    generations: HashMap<SegmentId, u64>,
}

impl CacheState {
    fn holds_segment(&self, segment: &SegmentId) -> bool {
        self.entries.iter().any(|(key, _)| key.segment == *segment)
            || self.in_flight.keys().any(|key| key.segment == *segment)
    }

    fn forget_if_idle(&mut self, segment: &SegmentId) {
        if !self.holds_segment(segment) {
            self.generations.remove(segment);
        }
    }

    fn evict(&mut self, matches: impl Fn(&CacheKey) -> bool) -> usize {
        let stale: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(key, _)| matches(key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            self.entries.pop(key);
        }
        stale.len()
    }
}

/// Memoizing cache of ordinal arrays keyed by (segment, generation, field).
///
/// At most one build runs per key: concurrent first callers queue on the
/// key's in-flight slot and receive the array built by the first. Failed
/// builds are not cached. Observing a newer generation of a segment drops
/// every entry of its older generations; arrays already handed out are
/// unaffected, and readers still on an older generation are served without
/// caching.
pub struct FieldCache {
    state: Mutex<CacheState>,
    capacity: usize,
    hit_count: AtomicUsize,
    miss_count: AtomicUsize,
    build_count: AtomicUsize,
}

impl FieldCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        FieldCache {
            state: Mutex::new(CacheState {
                entries: LruCache::new(cap),
                in_flight: HashMap::new(),
                generations: HashMap::new(),
            }),
            capacity,
            hit_count: AtomicUsize::new(0),
            miss_count: AtomicUsize::new(0),
            build_count: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.field_cache_capacity)
    }

    /// Get or build the ordinal array of `field` for this segment generation.
    pub fn ordinals(&self, segment: &SegmentContext, field: &str) -> Result<Arc<OrdinalArray>> {
        let key = CacheKey {
            segment: segment.id(),
            generation: segment.generation(),
            field: field.to_string(),
        };

        let slot = {
            let mut state = self.state.lock();
            self.observe_generation(&mut state, key.segment, key.generation);
            if let Some(array) = state.entries.get(&key) {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                trace!("field cache hit for {} in segment {} gen {}", field, key.segment, key.generation);
                return Ok(array.clone());
            }
            state
                .in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(None)))
                .clone()
        };

        let mut built = slot.lock();
        if let Some(array) = built.as_ref() {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            return Ok(array.clone());
        }

        self.miss_count.fetch_add(1, Ordering::Relaxed);
        let result = OrdinalArray::build(segment.fields(), field);

        // Lock order is slot then state; nobody waits on a slot while holding state
        let mut state = self.state.lock();
        if state.in_flight.get(&key).is_some_and(|s| Arc::ptr_eq(s, &slot)) {
            state.in_flight.remove(&key);
        }

        let array = match result {
            Ok(array) => Arc::new(array),
            Err(e) => {
                state.forget_if_idle(&key.segment);
                warn!(
                    "failed to build ordinals for {} in segment {} gen {}: {}",
                    field, key.segment, key.generation, e
                );
                return Err(e);
            }
        };
        self.build_count.fetch_add(1, Ordering::Relaxed);
        debug!(
            "built ordinals for {} in segment {} gen {}: {} docs, {} terms",
            field,
            key.segment,
            key.generation,
            array.max_doc(),
            array.num_terms()
        );
        *built = Some(array.clone());

        let latest = *state.generations.entry(key.segment).or_insert(key.generation);
        if latest > key.generation {
            trace!("not caching gen {} of segment {}, gen {} is current", key.generation, key.segment, latest);
        } else if let Some((evicted, _)) = state.entries.push(key.clone(), array.clone()) {
            if evicted != key {
                state.forget_if_idle(&evicted.segment);
            }
        }

        Ok(array)
    }

    /// Record the generation a reader is using; a newer one evicts older entries.
    fn observe_generation(&self, state: &mut CacheState, segment: SegmentId, generation: u64) {
        let previous = state.generations.get(&segment).copied();
        if previous.is_some_and(|latest| latest >= generation) {
            return;
        }
        state.generations.insert(segment, generation);

        if let Some(previous) = previous {
            let evicted = state.evict(|key| key.segment == segment && key.generation < generation);
            info!(
                "segment {} moved from gen {} to gen {}, dropped {} cached ordinal arrays",
                segment, previous, generation, evicted
            );
        }
    }

    /// Drop every cached generation of a segment.
    pub fn invalidate_segment(&self, segment: &SegmentId) {
        let mut state = self.state.lock();
        state.evict(|key| key.segment == *segment);
        state.forget_if_idle(segment);
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        let building: Vec<SegmentId> = state.in_flight.keys().map(|key| key.segment).collect();
        state.generations.retain(|segment, _| building.contains(segment));
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            build_count: self.build_count.load(Ordering::Relaxed),
            size: state.entries.len(),
            in_flight: state.in_flight.len(),
            tracked_segments: state.generations.len(),
            capacity: self.capacity,
        }
    }
}

impl Default for FieldCache {
    fn default() -> Self {
        FieldCache::from_config(&Config::default())
    }
}

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub build_count: usize,
    pub size: usize,
    pub in_flight: usize,
    pub tracked_segments: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}
