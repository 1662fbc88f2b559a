use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;
use log::{debug, trace};

use crate::entry::Entry;
use crate::ledger::WeightLedger;
use crate::list::{Iter, RecencyList};
use crate::listener::{BoxedListener, EvictionListener};
use crate::metrics::CacheMetrics;
use crate::traits::Weighted;

/// Slots reserved up front; larger caches grow on demand.
const INITIAL_CAPACITY_LIMIT: usize = 1024;

/// What forced an entry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EvictionCause {
	/// A new key arrived while `max_count` entries were resident.
	Count,
	/// The total weight exceeded `max_weight`.
	Weight,
}

/// Activity counters behind [`CacheMetrics`].
#[derive(Debug, Clone, Default)]
struct Counters {
	hits: u64,
	misses: u64,
	inserts: u64,
	updates: u64,
	evictions: u64,
	removals: u64,
}

/// Least-recently-used cache bounded by entry count and by total value weight.
///
/// # Recency and eviction
///
/// Every `set` and every successful `get` makes the touched key the
/// most-recently-used entry. When a bound would be exceeded the cache drops
/// entries from the least-recently-used end, one at a time, until both bounds
/// hold again:
///
/// - **Count**: inserting a new key while `len() == max_count()` evicts exactly
///   the current least-recently-used entry before the new one goes in.
/// - **Weight**: whenever `max_weight() > 0` and `total_weight()` exceeds it,
///   entries are evicted until it no longer does. A single value heavier than
///   the whole bound is therefore evicted right after it is stored.
///
/// Each eviction is reported to the [`EvictionListener`], if one is set,
/// before the next one happens.
///
/// # Concurrency
///
/// The cache does no locking. Share it across threads by wrapping it, for
/// example in `parking_lot::Mutex<LruCache<K, V>>`. The listener is owned by
/// the cache and runs while the cache is mutably borrowed, so it cannot call
/// back into the same cache:
///
/// ```compile_fail
/// use weighted_lru::LruCache;
///
/// let mut cache: LruCache<u32, u32> = LruCache::new(2);
/// cache.set_eviction_listener(|key: u32, _value: u32| {
///     cache.remove(&key);
/// });
/// ```
///
/// # Example
///
/// ```
/// use weighted_lru::LruCache;
///
/// let mut cache = LruCache::with_max_weight(10, 8);
/// cache.set("a", "aaaa".to_string());
/// cache.set("b", "bbbb".to_string());
/// assert_eq!(cache.total_weight(), 8);
///
/// // Touch "a" so that "b" becomes the least recently used entry.
/// assert!(cache.get("a").is_some());
/// cache.set("c", "cc".to_string());
///
/// assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["c", "a"]);
/// assert_eq!(cache.total_weight(), 6);
/// ```
pub struct LruCache<K, V> {
	/// Key to slot index in `list`
	index: HashMap<K, usize, RandomState>,
	/// Resident entries, most recently used first
	list: RecencyList<K, V>,
	ledger: WeightLedger,
	max_count: usize,
	listener: Option<BoxedListener<K, V>>,
	counters: Counters,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
	/// Create a cache holding at most `max_count` entries, with no weight bound.
	///
	/// # Panics
	///
	/// Panics if `max_count <= 1`.
	pub fn new(max_count: usize) -> Self {
		Self::with_max_weight(max_count, 0)
	}

	/// Create a cache bounded by both entry count and total weight.
	///
	/// A `max_weight` of `0` leaves the weight dimension unlimited.
	///
	/// # Panics
	///
	/// Panics if `max_count <= 1`.
	pub fn with_max_weight(max_count: usize, max_weight: u64) -> Self {
		assert!(max_count > 1, "max_count must be greater than 1, got {max_count}");
		let capacity = max_count.min(INITIAL_CAPACITY_LIMIT);
		Self {
			index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
			list: RecencyList::with_capacity(capacity),
			ledger: WeightLedger::new(max_weight),
			max_count,
			listener: None,
			counters: Counters::default(),
		}
	}

	/// Look up `key` and mark it most recently used.
	///
	/// A miss has no side effect besides the miss counter. A hit never changes
	/// `len()` or `total_weight()` and never evicts.
	pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let idx = self.touch(key)?;
		Some(&self.list.entry(idx).value)
	}

	/// Like [`get`](Self::get) but hands out a mutable reference.
	///
	/// The entry keeps the weight recorded when it was stored; changes made
	/// through the reference are not re-weighed. Use [`set`](Self::set) when
	/// the weight changes.
	pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let idx = self.touch(key)?;
		Some(&mut self.list.entry_mut(idx).value)
	}

	/// Look up `key` without changing recency order or counters.
	pub fn peek<Q>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let &idx = self.index.get(key)?;
		Some(&self.list.entry(idx).value)
	}

	/// Whether `key` is resident. Does not change recency order.
	pub fn contains<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.index.contains_key(key)
	}

	/// Remove `key` and return its value.
	///
	/// This is a caller-requested discard, not an eviction: the eviction
	/// listener is not invoked.
	pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let idx = self.index.remove(key)?;
		let entry = self.list.remove(idx);
		self.ledger.debit(entry.weight);
		self.counters.removals += 1;
		Some(entry.value)
	}

	/// Remove and return the least-recently-used entry without notifying the
	/// eviction listener.
	pub fn pop_lru(&mut self) -> Option<(K, V)> {
		let entry = self.list.remove_tail()?;
		self.index.remove(&entry.key);
		self.ledger.debit(entry.weight);
		self.counters.removals += 1;
		Some(entry.into_pair())
	}

	/// The least-recently-used entry, without touching it.
	pub fn lru(&self) -> Option<(&K, &V)> {
		self.iter().next_back()
	}

	/// The most-recently-used entry, without touching it.
	pub fn mru(&self) -> Option<(&K, &V)> {
		self.iter().next()
	}

	/// Change the weight bound, evicting least-recently-used entries until the
	/// resident set fits under it.
	///
	/// Raising the bound, or setting it to `0` (unlimited), never evicts.
	/// Returns the number of entries evicted; each one is reported to the
	/// eviction listener.
	pub fn set_max_weight(&mut self, max_weight: u64) -> usize {
		let previous = self.ledger.max();
		if !self.ledger.set_max(max_weight) {
			return 0;
		}
		let evicted = self.enforce_weight_bound();
		debug!(
			"max_weight lowered from {} to {}: evicted {} entries, {} remain with total weight {}",
			previous,
			max_weight,
			evicted,
			self.list.len(),
			self.ledger.total()
		);
		evicted
	}

	/// Install the observer called for every eviction, replacing any previous
	/// one.
	///
	/// The listener must be `Send` so the cache stays `Send` and can be moved
	/// across threads or kept behind a lock. A listener that records into
	/// shared state holds an `Arc<Mutex<..>>` rather than a `Rc<RefCell<..>>`:
	///
	/// ```
	/// use std::sync::{Arc, Mutex};
	/// use weighted_lru::LruCache;
	///
	/// let evicted = Arc::new(Mutex::new(Vec::new()));
	/// let sink = evicted.clone();
	///
	/// let mut cache = LruCache::new(2);
	/// cache.set_eviction_listener(move |key: u32, _value: String| {
	///     sink.lock().unwrap().push(key);
	/// });
	/// cache.set(1, "a".to_string());
	/// cache.set(2, "b".to_string());
	/// cache.set(3, "c".to_string());
	///
	/// assert_eq!(*evicted.lock().unwrap(), [1]);
	/// ```
	pub fn set_eviction_listener<L>(&mut self, listener: L)
	where
		L: EvictionListener<K, V> + Send + 'static,
	{
		self.listener = Some(Box::new(listener));
	}

	pub(crate) fn set_boxed_listener(&mut self, listener: BoxedListener<K, V>) {
		self.listener = Some(listener);
	}

	/// Stop reporting evictions.
	pub fn clear_eviction_listener(&mut self) {
		self.listener = None;
	}

	/// Whether an eviction listener is installed.
	pub fn has_eviction_listener(&self) -> bool {
		self.listener.is_some()
	}

	/// Drop every entry. The eviction listener is not invoked.
	pub fn clear(&mut self) {
		let dropped = self.list.len();
		self.index.clear();
		self.list.clear();
		self.ledger.reset();
		if dropped > 0 {
			debug!("cleared {dropped} entries");
		}
	}

	/// Number of resident entries.
	pub fn len(&self) -> usize {
		self.list.len()
	}

	/// Whether no entries are resident.
	pub fn is_empty(&self) -> bool {
		self.list.len() == 0
	}

	/// Sum of the weights of all resident values.
	///
	/// Returned as `u128` so the sum is exact even when an unbounded cache
	/// holds weights adding up past `u64::MAX`. With a weight bound set it
	/// never exceeds [`max_weight`](Self::max_weight).
	pub fn total_weight(&self) -> u128 {
		self.ledger.total()
	}

	/// Entry-count bound, `usize::MAX` when unlimited.
	pub fn max_count(&self) -> usize {
		self.max_count
	}

	/// Weight bound, `0` when unlimited.
	pub fn max_weight(&self) -> u64 {
		self.ledger.max()
	}

	/// Resident entries, most-recently-used first.
	pub fn iter(&self) -> Iter<'_, K, V> {
		self.list.iter()
	}

	/// Resident keys, most-recently-used first.
	pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
		self.iter().map(|(key, _)| key)
	}

	/// Resident values, most-recently-used first.
	pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
		self.iter().map(|(_, value)| value)
	}

	/// Snapshot of cache activity and occupancy.
	pub fn metrics(&self) -> CacheMetrics {
		CacheMetrics {
			hits: self.counters.hits,
			misses: self.counters.misses,
			inserts: self.counters.inserts,
			updates: self.counters.updates,
			evictions: self.counters.evictions,
			removals: self.counters.removals,
			entry_count: self.list.len(),
			max_count: self.max_count,
			total_weight: self.ledger.total(),
			max_weight: self.ledger.max(),
		}
	}

	/// Zero the activity counters. Occupancy is unaffected.
	pub fn reset_metrics(&mut self) {
		self.counters = Counters::default();
	}

	/// Walk the whole structure and panic on the first broken invariant.
	///
	/// Checks that the index and the recency list hold the same entries, that
	/// every link is mirrored by its neighbour, that the walk from head ends at
	/// tail without cycles, and that the weight ledger and both bounds agree
	/// with what is resident. Runs in O(n); meant for tests and debugging.
	pub fn validate(&self) {
		let len = self.list.len();
		assert_eq!(
			self.index.len(),
			len,
			"index holds {} keys but the recency list holds {} entries",
			self.index.len(),
			len
		);
		assert!(len <= self.max_count, "{} entries resident with max_count {}", len, self.max_count);
		assert_eq!(
			self.list.slot_count(),
			len + self.list.vacant_count(),
			"slot accounting is off: {} slots, {} resident, {} vacant",
			self.list.slot_count(),
			len,
			self.list.vacant_count()
		);

		match (self.list.head(), self.list.tail()) {
			(None, None) => assert_eq!(len, 0, "empty list reports {len} entries"),
			(Some(head), Some(tail)) => {
				assert_eq!(self.list.entry(head).prev, None, "head slot {head} has a predecessor");
				assert_eq!(self.list.entry(tail).next, None, "tail slot {tail} has a successor");
				if len == 1 {
					assert_eq!(head, tail, "single entry must be both head and tail");
				}
			}
			(head, tail) => panic!("head {head:?} and tail {tail:?} disagree on emptiness"),
		}

		let mut walked = 0;
		let mut weight = 0u128;
		let mut prev = None;
		let mut cursor = self.list.head();
		while let Some(idx) = cursor {
			assert!(walked < len, "recency list has a cycle or more than {len} linked entries");
			let entry = self.list.entry(idx);
			assert_eq!(entry.prev, prev, "slot {idx} does not link back to slot {prev:?}");
			assert_eq!(
				self.index.get(&entry.key),
				Some(&idx),
				"slot {idx} is linked but not indexed under its key"
			);
			weight += u128::from(entry.weight);
			walked += 1;
			prev = Some(idx);
			cursor = entry.next;
		}
		assert_eq!(walked, len, "walked {walked} linked entries, expected {len}");
		assert_eq!(prev, self.list.tail(), "walk from head did not end at the tail");

		assert_eq!(
			weight,
			self.ledger.total(),
			"resident weight is {} but the ledger records {}",
			weight,
			self.ledger.total()
		);
		assert!(
			!self.ledger.is_over(),
			"total weight {} exceeds max_weight {}",
			self.ledger.total(),
			self.ledger.max()
		);
	}

	/// Promote `key` to the head if resident, updating hit/miss counters.
	fn touch<Q>(&mut self, key: &Q) -> Option<usize>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let Some(&idx) = self.index.get(key) else {
			self.counters.misses += 1;
			return None;
		};
		self.counters.hits += 1;
		self.list.promote_to_head(idx);
		Some(idx)
	}

	/// Evict the current tail and report it. Returns `false` if the cache is
	/// empty.
	fn evict_tail(&mut self, cause: EvictionCause) -> bool {
		let Some(entry) = self.list.remove_tail() else {
			return false;
		};
		self.index.remove(&entry.key);
		self.ledger.debit(entry.weight);
		self.counters.evictions += 1;
		trace!(
			"evicted lru entry of weight {} ({:?}), {} entries and weight {} remain",
			entry.weight,
			cause,
			self.list.len(),
			self.ledger.total()
		);
		if let Some(listener) = self.listener.as_mut() {
			let (key, value) = entry.into_pair();
			listener.on_evict(key, value);
		}
		true
	}

	/// Evict from the tail while over the weight bound. Returns the number of
	/// entries evicted.
	fn enforce_weight_bound(&mut self) -> usize {
		let mut evicted = 0;
		while self.ledger.is_over() && self.evict_tail(EvictionCause::Weight) {
			evicted += 1;
		}
		evicted
	}
}

impl<K: Hash + Eq + Clone, V: Weighted> LruCache<K, V> {
	/// Store `value` under `key` and make it the most-recently-used entry.
	///
	/// If `key` is resident its value is replaced, the weight ledger moves by
	/// the difference between the new and old weights, and the old value is
	/// returned. Otherwise a new entry is created, first evicting the
	/// least-recently-used entry when `max_count` entries are already resident.
	/// Either way the weight bound is enforced afterwards.
	pub fn set(&mut self, key: K, value: V) -> Option<V> {
		let weight = value.weight();
		let previous = match self.index.get(&key) {
			Some(&idx) => {
				let entry = self.list.entry_mut(idx);
				let old_weight = std::mem::replace(&mut entry.weight, weight);
				let old_value = std::mem::replace(&mut entry.value, value);
				self.ledger.replace(old_weight, weight);
				self.list.promote_to_head(idx);
				self.counters.updates += 1;
				Some(old_value)
			}
			None => {
				if self.list.len() >= self.max_count {
					self.evict_tail(EvictionCause::Count);
				}
				let idx = self.list.insert_at_head(Entry::new(key.clone(), value, weight));
				self.index.insert(key, idx);
				self.ledger.credit(weight);
				self.counters.inserts += 1;
				None
			}
		};
		self.enforce_weight_bound();
		previous
	}

	/// Rebuild recency order from a most-recently-used-first snapshot such as
	/// the one produced by [`to_pairs`](Self::to_pairs).
	///
	/// Pairs are replayed through [`set`](Self::set) from the back, so the
	/// first pair ends up most recently used. Bounds apply as usual and any
	/// resulting evictions are reported.
	pub fn restore<I>(&mut self, pairs: I)
	where
		I: IntoIterator<Item = (K, V)>,
		I::IntoIter: DoubleEndedIterator,
	{
		for (key, value) in pairs.into_iter().rev() {
			self.set(key, value);
		}
	}
}

impl<K: Hash + Eq + Clone, V: Clone> LruCache<K, V> {
	/// Owned copy of the resident pairs, most-recently-used first.
	///
	/// Feed it back through [`restore`](Self::restore) to reproduce the same
	/// recency order.
	pub fn to_pairs(&self) -> Vec<(K, V)> {
		self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
	}
}

impl<K: Hash + Eq + Clone, V: Weighted> Extend<(K, V)> for LruCache<K, V> {
	/// Calls [`set`](LruCache::set) for each pair in iteration order, so the
	/// last pair ends up most recently used.
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.set(key, value);
		}
	}
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a LruCache<K, V> {
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<K, V> fmt::Debug for LruCache<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LruCache")
			.field("len", &self.list.len())
			.field("max_count", &self.max_count)
			.field("total_weight", &self.ledger.total())
			.field("max_weight", &self.ledger.max())
			.field("has_listener", &self.listener.is_some())
			.finish()
	}
}
