//! Cache activity counters.

/// Snapshot of cache activity and occupancy.
///
/// Counters accumulate from construction or from the last
/// [`reset_metrics`](crate::LruCache::reset_metrics) call.
///
/// # Example
///
/// ```
/// use weighted_lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.set("a", 1u32);
/// cache.get("a");
/// cache.get("b");
///
/// let metrics = cache.metrics();
/// assert_eq!(metrics.hit_rate(), 0.5);
/// assert_eq!(metrics.entry_count, 1);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
	/// Lookups through `get`/`get_mut` that found the key.
	pub hits: u64,
	/// Lookups through `get`/`get_mut` that missed.
	pub misses: u64,
	/// `set` calls that created a new entry.
	pub inserts: u64,
	/// `set` calls that replaced the value of a resident key.
	pub updates: u64,
	/// Entries dropped to satisfy `max_count` or `max_weight`.
	pub evictions: u64,
	/// Entries dropped on request (`remove`, `pop_lru`).
	pub removals: u64,
	/// Resident entries.
	pub entry_count: usize,
	/// Configured count bound.
	pub max_count: usize,
	/// Sum of resident weights.
	pub total_weight: u128,
	/// Configured weight bound, `0` when unlimited.
	pub max_weight: u64,
}

impl CacheMetrics {
	/// Ratio of hits to lookups, `0.0` before any lookup.
	pub fn hit_rate(&self) -> f64 {
		let total = self.total_accesses();
		if total == 0 {
			0.0
		} else {
			self.hits as f64 / total as f64
		}
	}

	/// Fraction of the weight bound in use. Always `0.0` when the weight
	/// dimension is unlimited.
	pub fn weight_utilization(&self) -> f64 {
		if self.max_weight == 0 {
			0.0
		} else {
			self.total_weight as f64 / self.max_weight as f64
		}
	}

	/// Lookups that counted as a hit or a miss.
	pub fn total_accesses(&self) -> u64 {
		self.hits + self.misses
	}

	/// Calls to `set`, inserts plus updates.
	pub fn total_writes(&self) -> u64 {
		self.inserts + self.updates
	}
}
