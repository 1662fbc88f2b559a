use std::fmt;
use std::hash::Hash;

use crate::cache::LruCache;
use crate::listener::{BoxedListener, EvictionListener};

/// Builder for configuring an [`LruCache`].
///
/// # Example
///
/// ```
/// use weighted_lru::CacheBuilder;
///
/// let mut cache = CacheBuilder::new()
///     .max_count(1_000)
///     .max_weight(64 * 1024 * 1024) // 64 MB of values
///     .eviction_listener(|key: u64, value: Vec<u8>| {
///         println!("evicted {key} ({} bytes)", value.len());
///     })
///     .build();
///
/// cache.set(1, vec![0u8; 16]);
/// assert_eq!(cache.total_weight(), 16);
/// ```
pub struct CacheBuilder<K, V> {
	max_count: usize,
	max_weight: u64,
	listener: Option<BoxedListener<K, V>>,
}

impl<K, V> CacheBuilder<K, V> {
	/// Create a builder with no practical count bound and no weight bound.
	pub fn new() -> Self {
		Self {
			max_count: usize::MAX,
			max_weight: 0,
			listener: None,
		}
	}

	/// Maximum number of resident entries. Must be greater than 1.
	///
	/// Default: `usize::MAX`
	pub fn max_count(mut self, max_count: usize) -> Self {
		self.max_count = max_count;
		self
	}

	/// Maximum total weight of resident values, `0` for unlimited.
	///
	/// Default: 0
	pub fn max_weight(mut self, max_weight: u64) -> Self {
		self.max_weight = max_weight;
		self
	}

	/// Observer invoked for every eviction.
	///
	/// Like [`LruCache::set_eviction_listener`], the listener must be `Send`
	/// so the built cache is `Send`. Share recorded evictions through an
	/// `Arc<Mutex<..>>`.
	pub fn eviction_listener<L>(mut self, listener: L) -> Self
	where
		L: EvictionListener<K, V> + Send + 'static,
	{
		self.listener = Some(Box::new(listener));
		self
	}
}

impl<K: Hash + Eq, V> CacheBuilder<K, V> {
	/// Build the cache with the configured settings.
	///
	/// # Panics
	///
	/// Panics if `max_count <= 1`.
	pub fn build(self) -> LruCache<K, V> {
		let mut cache = LruCache::with_max_weight(self.max_count, self.max_weight);
		if let Some(listener) = self.listener {
			cache.set_boxed_listener(listener);
		}
		cache
	}
}

impl<K, V> Default for CacheBuilder<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V> fmt::Debug for CacheBuilder<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CacheBuilder")
			.field("max_count", &self.max_count)
			.field("max_weight", &self.max_weight)
			.field("has_listener", &self.listener.is_some())
			.finish()
	}
}
