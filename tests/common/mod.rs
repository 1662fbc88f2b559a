#![allow(dead_code)]

use std::sync::{Arc, Once};

use env_logger::Builder;
use log::LevelFilter;
use parking_lot::Mutex;
use weighted_lru::{LruCache, Weighted};

static INIT: Once = Once::new();

/// Install a test logger once per test binary. `RUST_LOG` overrides the level.
pub fn init_logger() {
	INIT.call_once_force(|_| {
		let mut builder = Builder::new();
		builder
			.filter_level(LevelFilter::Info)
			.filter_module("weighted_lru", LevelFilter::Trace)
			.is_test(true)
			.parse_default_env();
		let _ = builder.try_init();
	});
}

/// Value whose weight is the wrapped number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cost(pub u64);

impl Weighted for Cost {
	fn weight(&self) -> u64 {
		self.0
	}
}

pub type Evicted<K, V> = Arc<Mutex<Vec<(K, V)>>>;

/// Attach a listener that records every eviction in order.
pub fn record_evictions<K, V>(cache: &mut LruCache<K, V>) -> Evicted<K, V>
where
	K: std::hash::Hash + Eq + Send + 'static,
	V: Send + 'static,
{
	let evicted: Evicted<K, V> = Arc::new(Mutex::new(Vec::new()));
	let sink = evicted.clone();
	cache.set_eviction_listener(move |key: K, value: V| sink.lock().push((key, value)));
	evicted
}
