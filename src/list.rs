//! Recency ordering over a slab of entries.
//!
//! Entries live in a `Vec` of slots and link to each other by slot index, so
//! the doubly-linked order carries no reference cycles and needs no `unsafe`.
//! Vacated slots are recycled through a free list; slot indices are stable for
//! as long as an entry stays resident, which is what the cache index stores.
//!
//! Head is the most-recently-used entry, tail the least-recently-used one.

use std::iter::FusedIterator;

use crate::entry::Entry;

pub(crate) struct RecencyList<K, V> {
	slots: Vec<Option<Entry<K, V>>>,
	/// Vacant slot indices available for reuse
	free: Vec<usize>,
	head: Option<usize>,
	tail: Option<usize>,
	len: usize,
}

impl<K, V> RecencyList<K, V> {
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			slots: Vec::with_capacity(capacity),
			free: Vec::new(),
			head: None,
			tail: None,
			len: 0,
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.len
	}

	pub(crate) fn head(&self) -> Option<usize> {
		self.head
	}

	pub(crate) fn tail(&self) -> Option<usize> {
		self.tail
	}

	/// Total number of slots ever allocated, resident or vacant.
	pub(crate) fn slot_count(&self) -> usize {
		self.slots.len()
	}

	pub(crate) fn vacant_count(&self) -> usize {
		self.free.len()
	}

	pub(crate) fn entry(&self, idx: usize) -> &Entry<K, V> {
		match self.slots.get(idx) {
			Some(Some(entry)) => entry,
			_ => panic!("recency list slot {idx} is vacant"),
		}
	}

	pub(crate) fn entry_mut(&mut self, idx: usize) -> &mut Entry<K, V> {
		match self.slots.get_mut(idx) {
			Some(Some(entry)) => entry,
			_ => panic!("recency list slot {idx} is vacant"),
		}
	}

	/// Store a new entry and link it as the head. Returns its slot index.
	pub(crate) fn insert_at_head(&mut self, entry: Entry<K, V>) -> usize {
		debug_assert!(entry.is_detached());
		let idx = match self.free.pop() {
			Some(idx) => {
				self.slots[idx] = Some(entry);
				idx
			}
			None => {
				self.slots.push(Some(entry));
				self.slots.len() - 1
			}
		};
		self.link_at_head(idx);
		self.len += 1;
		idx
	}

	/// Move a resident entry to the head. No-op if it already is the head.
	pub(crate) fn promote_to_head(&mut self, idx: usize) {
		if self.head == Some(idx) {
			return;
		}
		self.unlink(idx);
		self.link_at_head(idx);
	}

	/// Detach and free the tail entry.
	pub(crate) fn remove_tail(&mut self) -> Option<Entry<K, V>> {
		let idx = self.tail?;
		Some(self.remove(idx))
	}

	/// Detach and free the entry at `idx`, wherever it sits.
	pub(crate) fn remove(&mut self, idx: usize) -> Entry<K, V> {
		self.unlink(idx);
		let entry = match self.slots.get_mut(idx).and_then(Option::take) {
			Some(entry) => entry,
			None => panic!("recency list slot {idx} is vacant"),
		};
		self.free.push(idx);
		self.len -= 1;
		entry
	}

	/// Drop every entry and forget all slots.
	pub(crate) fn clear(&mut self) {
		self.slots.clear();
		self.free.clear();
		self.head = None;
		self.tail = None;
		self.len = 0;
	}

	pub(crate) fn iter(&self) -> Iter<'_, K, V> {
		Iter {
			list: self,
			front: self.head,
			back: self.tail,
			remaining: self.len,
		}
	}

	/// Remove `idx` from the chain, repairing both neighbours and the
	/// head/tail markers. The slot itself stays occupied.
	fn unlink(&mut self, idx: usize) {
		let (prev, next) = {
			let entry = self.entry_mut(idx);
			(entry.prev.take(), entry.next.take())
		};

		match prev {
			Some(p) => self.entry_mut(p).next = next,
			None => self.head = next,
		}
		match next {
			Some(n) => self.entry_mut(n).prev = prev,
			None => self.tail = prev,
		}
	}

	/// Link a detached, occupied slot in front of the current head.
	fn link_at_head(&mut self, idx: usize) {
		let old_head = self.head;
		{
			let entry = self.entry_mut(idx);
			entry.prev = None;
			entry.next = old_head;
		}
		match old_head {
			Some(h) => self.entry_mut(h).prev = Some(idx),
			None => self.tail = Some(idx),
		}
		self.head = Some(idx);
	}
}

/// Iterator over resident entries, most-recently-used first.
///
/// Returned by [`LruCache::iter`](crate::LruCache::iter). Iterating from the
/// back walks from the least-recently-used end.
pub struct Iter<'a, K, V> {
	list: &'a RecencyList<K, V>,
	front: Option<usize>,
	back: Option<usize>,
	remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let entry = self.list.entry(self.front?);
		self.front = entry.next;
		self.remaining -= 1;
		Some((&entry.key, &entry.value))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let entry = self.list.entry(self.back?);
		self.back = entry.prev;
		self.remaining -= 1;
		Some((&entry.key, &entry.value))
	}
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
	fn clone(&self) -> Self {
		Self {
			list: self.list,
			front: self.front,
			back: self.back,
			remaining: self.remaining,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn keys(list: &RecencyList<&'static str, u32>) -> Vec<&'static str> {
		list.iter().map(|(k, _)| *k).collect()
	}

	fn push(list: &mut RecencyList<&'static str, u32>, key: &'static str) -> usize {
		list.insert_at_head(Entry::new(key, 0, 0))
	}

	#[test]
	fn test_single_entry_is_head_and_tail() {
		let mut list = RecencyList::with_capacity(4);
		let a = push(&mut list, "a");
		assert_eq!(list.head(), Some(a));
		assert_eq!(list.tail(), Some(a));

		list.promote_to_head(a);
		assert_eq!(list.head(), Some(a));
		assert_eq!(list.tail(), Some(a));

		let entry = list.remove_tail().expect("one entry");
		assert_eq!(entry.key, "a");
		assert!(entry.is_detached());
		assert_eq!(list.head(), None);
		assert_eq!(list.tail(), None);
		assert_eq!(list.len(), 0);
	}

	#[test]
	fn test_insert_orders_most_recent_first() {
		let mut list = RecencyList::with_capacity(4);
		push(&mut list, "a");
		push(&mut list, "b");
		push(&mut list, "c");
		assert_eq!(keys(&list), ["c", "b", "a"]);
		assert_eq!(list.iter().rev().map(|(k, _)| *k).collect::<Vec<_>>(), ["a", "b", "c"]);
	}

	#[test]
	fn test_promote_tail_and_middle() {
		let mut list = RecencyList::with_capacity(4);
		let a = push(&mut list, "a");
		let b = push(&mut list, "b");
		push(&mut list, "c");

		list.promote_to_head(a);
		assert_eq!(keys(&list), ["a", "c", "b"]);
		assert_eq!(list.tail(), Some(b));

		list.promote_to_head(list.tail().expect("tail"));
		assert_eq!(keys(&list), ["b", "a", "c"]);
	}

	#[test]
	fn test_promote_in_two_entry_list() {
		let mut list = RecencyList::with_capacity(2);
		let a = push(&mut list, "a");
		let b = push(&mut list, "b");

		list.promote_to_head(a);
		assert_eq!(list.head(), Some(a));
		assert_eq!(list.tail(), Some(b));
		assert_eq!(list.entry(b).next, None);
		assert_eq!(list.entry(a).prev, None);
	}

	#[test]
	fn test_remove_head_middle_and_tail() {
		let mut list = RecencyList::with_capacity(4);
		let a = push(&mut list, "a");
		let b = push(&mut list, "b");
		let c = push(&mut list, "c");
		let d = push(&mut list, "d");

		assert_eq!(list.remove(b).key, "b");
		assert_eq!(keys(&list), ["d", "c", "a"]);

		assert_eq!(list.remove(d).key, "d");
		assert_eq!(list.head(), Some(c));

		assert_eq!(list.remove(a).key, "a");
		assert_eq!(list.tail(), Some(c));
		assert_eq!(list.head(), Some(c));
		assert_eq!(list.len(), 1);
	}

	#[test]
	fn test_slots_are_recycled() {
		let mut list = RecencyList::with_capacity(2);
		push(&mut list, "a");
		let b = push(&mut list, "b");
		list.remove(b);
		assert_eq!(list.vacant_count(), 1);

		let c = push(&mut list, "c");
		assert_eq!(c, b);
		assert_eq!(list.slot_count(), 2);
		assert_eq!(list.vacant_count(), 0);
		assert_eq!(keys(&list), ["c", "a"]);
	}

	#[test]
	fn test_iter_meets_in_the_middle() {
		let mut list = RecencyList::with_capacity(4);
		for key in ["a", "b", "c", "d"] {
			push(&mut list, key);
		}
		let mut iter = list.iter();
		assert_eq!(iter.len(), 4);
		assert_eq!(iter.next().map(|(k, _)| *k), Some("d"));
		assert_eq!(iter.next_back().map(|(k, _)| *k), Some("a"));
		assert_eq!(iter.next().map(|(k, _)| *k), Some("c"));
		assert_eq!(iter.next_back().map(|(k, _)| *k), Some("b"));
		assert_eq!(iter.next(), None);
		assert_eq!(iter.next_back(), None);
	}

	#[test]
	fn test_remove_tail_on_empty_list() {
		let mut list: RecencyList<&'static str, u32> = RecencyList::with_capacity(0);
		assert!(list.remove_tail().is_none());
	}
}
