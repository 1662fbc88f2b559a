use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use weighted_lru::{LruCache, Weighted};

#[derive(Clone, Debug, PartialEq)]
struct BenchValue {
	data: Vec<u8>,
}

impl Weighted for BenchValue {
	fn weight(&self) -> u64 {
		self.data.len() as u64
	}
}

fn value(len: usize) -> BenchValue {
	BenchValue {
		data: vec![0u8; len],
	}
}

fn bench_insert(c: &mut Criterion) {
	let mut group = c.benchmark_group("insert");

	for size in [100, 1000, 10000] {
		group.throughput(Throughput::Elements(size as u64));
		group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
			b.iter(|| {
				let mut cache = LruCache::with_max_weight(size as usize, 1024 * 1024);
				for i in 0..size {
					cache.set(black_box(i), black_box(value(64)));
				}
			});
		});
	}

	group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
	let mut cache = LruCache::new(1000);

	for i in 0..1000u64 {
		cache.set(i, value(64));
	}

	c.bench_function("get_hit", |b| {
		b.iter(|| {
			for i in 0..1000u64 {
				let _ = cache.get(&black_box(i));
			}
		});
	});
}

fn bench_get_vs_peek(c: &mut Criterion) {
	let mut cache = LruCache::new(100);

	for i in 0..100u64 {
		cache.set(i, value(64));
	}

	let mut group = c.benchmark_group("lookup_methods");

	group.bench_function("get", |b| {
		b.iter(|| {
			for i in 0..100u64 {
				let _ = cache.get(&black_box(i));
			}
		});
	});

	group.bench_function("peek", |b| {
		b.iter(|| {
			for i in 0..100u64 {
				let _ = cache.peek(&black_box(i));
			}
		});
	});

	group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
	let mut cache = LruCache::with_max_weight(500, 500 * 64);

	for i in 0..500u64 {
		cache.set(i, value(64));
	}

	c.bench_function("mixed_80_20", |b| {
		b.iter(|| {
			for i in 0..100u64 {
				if i % 5 == 0 {
					// 20% writes
					cache.set(black_box(i), value(64));
				} else {
					// 80% reads
					let _ = cache.get(&black_box(i % 500));
				}
			}
		});
	});
}

fn bench_count_eviction(c: &mut Criterion) {
	c.bench_function("count_eviction", |b| {
		b.iter(|| {
			let mut cache = LruCache::new(100);
			for i in 0..1000u64 {
				cache.set(black_box(i), value(16));
			}
		});
	});
}

fn bench_weight_eviction(c: &mut Criterion) {
	c.bench_function("weight_eviction", |b| {
		b.iter(|| {
			// Small weight budget, varying value sizes
			let mut cache = LruCache::with_max_weight(10_000, 10240);
			for i in 0..1000u64 {
				cache.set(black_box(i), value(32 + (i % 7) as usize * 32));
			}
		});
	});
}

fn bench_lower_max_weight(c: &mut Criterion) {
	let mut group = c.benchmark_group("lower_max_weight");

	for size in [100u64, 1000, 10000] {
		group.throughput(Throughput::Elements(size / 2));
		group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
			b.iter_batched(
				|| {
					let mut cache = LruCache::new(size as usize);
					for i in 0..size {
						cache.set(i, value(64));
					}
					cache
				},
				|mut cache| cache.set_max_weight(black_box(size / 2 * 64)),
				criterion::BatchSize::SmallInput,
			);
		});
	}

	group.finish();
}

fn bench_hit_rate_zipf(c: &mut Criterion) {
	let mut cache = LruCache::with_max_weight(64, 64 * 64);

	// First key appears 100 times, second 50 times, etc.
	let zipf_keys: Vec<u64> = (0..100)
		.flat_map(|i| {
			let freq = 100 / (i + 1);
			vec![i; freq as usize]
		})
		.collect();

	c.bench_function("zipf_distribution", |b| {
		b.iter(|| {
			for &key_id in &zipf_keys {
				if cache.get(&key_id).is_none() {
					cache.set(key_id, value(64));
				}
			}
		});
	});
}

criterion_group!(
	benches,
	bench_insert,
	bench_get_hit,
	bench_get_vs_peek,
	bench_mixed_workload,
	bench_count_eviction,
	bench_weight_eviction,
	bench_lower_max_weight,
	bench_hit_rate_zipf
);

criterion_main!(benches);
