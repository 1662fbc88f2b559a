/// Observer notified once per entry the cache evicts.
///
/// Evictions are the removals the cache performs on its own to satisfy
/// `max_count` or `max_weight`. Caller-requested removals
/// ([`remove`](crate::LruCache::remove), [`pop_lru`](crate::LruCache::pop_lru),
/// [`clear`](crate::LruCache::clear)) are not reported.
///
/// The listener runs synchronously inside the mutating call that caused the
/// eviction, in eviction order (least-recently-used first). Any closure taking
/// `(K, V)` is a listener.
///
/// The cache stores its listener as `Box<dyn EvictionListener<K, V> + Send>`,
/// so installed listeners must be `Send`. This keeps [`LruCache`](crate::LruCache)
/// `Send` when `K` and `V` are. Listeners that record into shared state should
/// capture an `Arc<Mutex<..>>`; captures of `Rc<RefCell<..>>` are rejected.
pub trait EvictionListener<K, V> {
	/// Receive ownership of an evicted entry.
	fn on_evict(&mut self, key: K, value: V);
}

impl<K, V, F> EvictionListener<K, V> for F
where
	F: FnMut(K, V),
{
	fn on_evict(&mut self, key: K, value: V) {
		self(key, value)
	}
}

/// Boxed listener as stored by the cache.
pub(crate) type BoxedListener<K, V> = Box<dyn EvictionListener<K, V> + Send>;
