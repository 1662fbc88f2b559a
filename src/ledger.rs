//! Cumulative weight accounting.

/// Tracks the total weight of resident entries against an optional bound.
///
/// A bound of `0` means the weight dimension is unlimited. Individual weights
/// are `u64`; the total is kept as `u128` so it stays exact even when resident
/// weights sum past `u64::MAX`. The ledger is only ever debited by amounts it
/// was previously credited with, so `total` cannot underflow while the cache
/// invariants hold.
#[derive(Debug, Clone, Default)]
pub(crate) struct WeightLedger {
	total: u128,
	max: u64,
}

impl WeightLedger {
	pub(crate) fn new(max: u64) -> Self {
		Self {
			total: 0,
			max,
		}
	}

	pub(crate) fn total(&self) -> u128 {
		self.total
	}

	pub(crate) fn max(&self) -> u64 {
		self.max
	}

	pub(crate) fn is_bounded(&self) -> bool {
		self.max > 0
	}

	/// True while the bound is set and the total exceeds it.
	pub(crate) fn is_over(&self) -> bool {
		self.is_bounded() && self.total > u128::from(self.max)
	}

	pub(crate) fn credit(&mut self, weight: u64) {
		self.total += u128::from(weight);
	}

	pub(crate) fn debit(&mut self, weight: u64) {
		let weight = u128::from(weight);
		debug_assert!(
			weight <= self.total,
			"weight ledger underflow: debit {} from total {}",
			weight,
			self.total
		);
		self.total = self.total.saturating_sub(weight);
	}

	/// Swap an entry's contribution in place.
	pub(crate) fn replace(&mut self, old: u64, new: u64) {
		self.debit(old);
		self.credit(new);
	}

	/// Install a new bound. Returns `true` when the new bound is tighter than
	/// the old one, i.e. when resident entries may now have to go.
	pub(crate) fn set_max(&mut self, max: u64) -> bool {
		let lowered = max > 0 && (self.max == 0 || max < self.max);
		self.max = max;
		lowered
	}

	pub(crate) fn reset(&mut self) {
		self.total = 0;
	}
}
