use std::sync::Arc;

use parking_lot::Mutex;
use weighted_lru::{CacheBuilder, DeepSizeOf, DeepSized};

/// Example demonstrating how value weight, not just entry count, decides how
/// much stays resident.

#[derive(Clone, Debug, PartialEq, DeepSizeOf)]
struct UserProfile {
	name: String,
	bio: String,
}

fn profile(id: u64, bio_len: usize) -> DeepSized<UserProfile> {
	DeepSized(UserProfile {
		name: format!("User {}", id),
		bio: "x".repeat(bio_len),
	})
}

fn main() {
	let evicted = Arc::new(Mutex::new(Vec::new()));
	let sink = evicted.clone();

	// At most 50 profiles, and at most ~4 KB of profile data.
	let mut cache = CacheBuilder::new()
		.max_count(50)
		.max_weight(4 * 1024)
		.eviction_listener(move |id: u64, _profile: DeepSized<UserProfile>| sink.lock().push(id))
		.build();

	// Small profiles: many fit.
	for id in 0..10 {
		cache.set(id, profile(id, 64));
	}
	println!("After 10 small profiles: {} entries, {} bytes", cache.len(), cache.total_weight());

	// Keep user 0 hot.
	if let Some(hot) = cache.get(&0) {
		println!("Read {}", hot.name);
	}

	// A few large profiles push the least recently used ones out.
	for id in 100..104 {
		cache.set(id, profile(id, 900));
	}

	if cache.contains(&0) {
		println!("✓ Recently read user 0 survived eviction");
	} else {
		println!("✗ User 0 was evicted");
	}
	println!("Evicted (oldest first): {:?}", evicted.lock());

	// Shrinking the budget evicts immediately.
	let dropped = cache.set_max_weight(2 * 1024);
	println!("Lowering max_weight to 2 KB evicted {} more entries", dropped);

	println!("\nResident, most recent first:");
	for (id, profile) in cache.iter() {
		println!("  {:>4}  {:<10}  bio {} bytes", id, profile.name, profile.bio.len());
	}

	let metrics = cache.metrics();
	println!("\nCache stats:");
	println!("  Entries: {}", metrics.entry_count);
	println!("  Weight: {} / {} bytes", metrics.total_weight, metrics.max_weight);
	println!("  Evictions: {}", metrics.evictions);
	println!("  Hit rate: {:.1}%", metrics.hit_rate() * 100.0);
}
