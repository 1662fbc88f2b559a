use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::sync::Arc;

use deepsize::DeepSizeOf;

/// Application-defined cost of a cached value.
///
/// The cache enforces `Σ weight(value) ≤ max_weight` whenever a weight bound is
/// configured. Weight is read once, when the value is stored with
/// [`LruCache::set`](crate::LruCache::set), and is not re-read afterwards.
///
/// This is *not* an eviction priority: eviction is always least-recently-used
/// first, weight only decides how many entries have to go.
///
/// # Example
///
/// ```
/// use weighted_lru::{LruCache, Weighted};
///
/// struct Thumbnail {
///     pixels: Vec<u8>,
/// }
///
/// impl Weighted for Thumbnail {
///     fn weight(&self) -> u64 {
///         self.pixels.len() as u64
///     }
/// }
///
/// let mut cache = LruCache::with_max_weight(16, 1024);
/// cache.set("logo", Thumbnail { pixels: vec![0; 600] });
/// cache.set("icon", Thumbnail { pixels: vec![0; 600] });
/// assert_eq!(cache.len(), 1);
/// ```
pub trait Weighted {
	/// Cost of this value in the unit the cache's weight bound is expressed in.
	fn weight(&self) -> u64;
}

impl Weighted for String {
	fn weight(&self) -> u64 {
		self.len() as u64
	}
}

impl Weighted for str {
	fn weight(&self) -> u64 {
		self.len() as u64
	}
}

impl Weighted for [u8] {
	fn weight(&self) -> u64 {
		self.len() as u64
	}
}

/// Weighs the element storage, `len * size_of::<T>()`.
impl<T> Weighted for Vec<T> {
	fn weight(&self) -> u64 {
		(self.len() * std::mem::size_of::<T>()) as u64
	}
}

impl<T: Weighted + ?Sized> Weighted for &T {
	fn weight(&self) -> u64 {
		(**self).weight()
	}
}

impl<T: Weighted + ?Sized> Weighted for Box<T> {
	fn weight(&self) -> u64 {
		(**self).weight()
	}
}

impl<T: Weighted + ?Sized> Weighted for Arc<T> {
	fn weight(&self) -> u64 {
		(**self).weight()
	}
}

impl<T: Weighted + ?Sized> Weighted for Rc<T> {
	fn weight(&self) -> u64 {
		(**self).weight()
	}
}

impl<T: Weighted> Weighted for Option<T> {
	fn weight(&self) -> u64 {
		self.as_ref().map_or(0, Weighted::weight)
	}
}

macro_rules! weightless {
	($($ty:ty),* $(,)?) => {
		$(
			impl Weighted for $ty {
				#[inline]
				fn weight(&self) -> u64 {
					0
				}
			}
		)*
	};
}

// Scalars only count towards `max_count`.
weightless!(
	(),
	bool,
	char,
	u8,
	u16,
	u32,
	u64,
	u128,
	usize,
	i8,
	i16,
	i32,
	i64,
	i128,
	isize,
	f32,
	f64,
);

/// Wrapper that weighs a value by its deep heap footprint.
///
/// # Example
///
/// ```
/// use weighted_lru::{DeepSized, DeepSizeOf, Weighted};
///
/// #[derive(DeepSizeOf)]
/// struct Row {
///     columns: Vec<String>,
/// }
///
/// let row = DeepSized(Row { columns: vec!["id".to_string(), "name".to_string()] });
/// assert!(row.weight() > 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepSized<T>(pub T);

impl<T: DeepSizeOf> Weighted for DeepSized<T> {
	fn weight(&self) -> u64 {
		self.0.deep_size_of() as u64
	}
}

impl<T> Deref for DeepSized<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.0
	}
}

impl<T> DerefMut for DeepSized<T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.0
	}
}

/// Wrapper for values that should only count towards `max_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unweighted<T>(pub T);

impl<T> Weighted for Unweighted<T> {
	fn weight(&self) -> u64 {
		0
	}
}

impl<T> Deref for Unweighted<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_byte_backed_weights() {
		assert_eq!("hello".to_string().weight(), 5);
		assert_eq!("hey".weight(), 3);
		assert_eq!(vec![0u8; 12].weight(), 12);
		assert_eq!(vec![0u32; 3].weight(), 12);
		assert_eq!(Box::<[u8]>::from(&b"abcd"[..]).weight(), 4);
		assert_eq!(Arc::new("abc".to_string()).weight(), 3);
	}

	#[test]
	fn test_option_and_scalars() {
		assert_eq!(Some("ab".to_string()).weight(), 2);
		assert_eq!(None::<String>.weight(), 0);
		assert_eq!(42u64.weight(), 0);
		assert_eq!(Unweighted(vec![1u8; 100]).weight(), 0);
	}

	#[test]
	fn test_deep_sized_counts_heap() {
		let small = DeepSized(vec![String::new()]);
		let large = DeepSized(vec!["x".repeat(256)]);
		assert!(large.weight() >= small.weight() + 256);
		assert_eq!(large.len(), 1);
	}
}
