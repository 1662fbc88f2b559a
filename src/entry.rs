//! Storage unit shared by the index and the recency list.

/// A resident key/value pair together with its recorded weight and its
/// neighbours in recency order.
///
/// `prev` points towards the most-recently-used end, `next` towards the
/// least-recently-used end. Both are slot indices into the owning
/// [`RecencyList`](crate::list::RecencyList), never references.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
	pub(crate) key: K,
	pub(crate) value: V,
	/// Weight captured when the value entered the cache.
	pub(crate) weight: u64,
	pub(crate) prev: Option<usize>,
	pub(crate) next: Option<usize>,
}

impl<K, V> Entry<K, V> {
	/// Create a detached entry.
	pub(crate) fn new(key: K, value: V, weight: u64) -> Self {
		Self {
			key,
			value,
			weight,
			prev: None,
			next: None,
		}
	}

	/// True when the entry has no neighbours on either side.
	pub(crate) fn is_detached(&self) -> bool {
		self.prev.is_none() && self.next.is_none()
	}

	pub(crate) fn into_pair(self) -> (K, V) {
		(self.key, self.value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_entry_is_detached() {
		let entry = Entry::new("a", 1u32, 7);
		assert!(entry.is_detached());
		assert_eq!(entry.weight, 7);
		assert_eq!(entry.into_pair(), ("a", 1));
	}
}
