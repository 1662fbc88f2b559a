//! # Weighted LRU
//!
//! An in-process least-recently-used cache with two independent, optional
//! bounds:
//! - **Entry count** (`max_count`)
//! - **Cumulative weight** (`max_weight`), an application-defined cost per
//!   value such as its byte size
//!
//! When either bound would be exceeded the cache evicts least-recently-used
//! entries until both hold, reporting each eviction synchronously to an
//! optional [`EvictionListener`].
//!
//! All operations are O(1) except [`LruCache::set_max_weight`], which is
//! O(k) in the number of entries it evicts, and [`LruCache::validate`].
//!
//! ## Quick Start
//!
//! ```rust
//! use weighted_lru::{LruCache, Weighted};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Page {
//!     body: Vec<u8>,
//! }
//!
//! impl Weighted for Page {
//!     fn weight(&self) -> u64 {
//!         self.body.len() as u64
//!     }
//! }
//!
//! // At most 100 pages and at most 1 KiB of page bodies.
//! let mut cache = LruCache::with_max_weight(100, 1024);
//! cache.set_eviction_listener(|url: &'static str, _page: Page| {
//!     println!("evicted {url}");
//! });
//!
//! cache.set("/index", Page { body: vec![0; 600] });
//! cache.set("/about", Page { body: vec![0; 600] }); // evicts "/index"
//!
//! assert!(cache.get("/index").is_none());
//! assert_eq!(cache.total_weight(), 600);
//! ```
//!
//! ## Snapshots
//!
//! [`LruCache::to_pairs`] returns the resident pairs most-recently-used
//! first. [`LruCache::restore`] replays such a snapshot in reverse so the
//! rebuilt cache has the same recency order:
//!
//! ```rust
//! use weighted_lru::LruCache;
//!
//! let mut cache = LruCache::new(8);
//! cache.set("a", 1u32);
//! cache.set("b", 2u32);
//! cache.get("a");
//!
//! let mut copy = LruCache::new(8);
//! copy.restore(cache.to_pairs());
//! assert_eq!(copy.keys().collect::<Vec<_>>(), cache.keys().collect::<Vec<_>>());
//! ```
//!
//! ## Thread Safety
//!
//! The cache does no internal locking. It is `Send` when its keys and values
//! are, so it can be shared behind a lock:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//!
//! let cache = Arc::new(Mutex::new(LruCache::new(1024)));
//! cache.lock().set(key, value);
//! ```

mod builder;
mod cache;
mod entry;
mod ledger;
mod list;
mod listener;
mod metrics;
mod traits;

pub use builder::CacheBuilder;
pub use cache::LruCache;
pub use deepsize::DeepSizeOf;
pub use list::Iter;
pub use listener::EvictionListener;
pub use metrics::CacheMetrics;
pub use traits::{DeepSized, Unweighted, Weighted};
