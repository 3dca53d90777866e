//! Recently used style tracking.

use parking_lot::Mutex;

/// Default capacity of the recency list.
pub const DEFAULT_RECENT_CAPACITY: usize = 6;

/// Bounded, de-duplicated, most-recent-first list of style names.
///
/// Mutated from whichever thread activates a style and read from whichever
/// thread lists recents; the single mutex is the serialization point.
#[derive(Debug)]
pub struct RecencyTracker {
	capacity: usize,
	names: Mutex<Vec<String>>,
}

impl RecencyTracker {
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			names: Mutex::new(Vec::new()),
		}
	}

	/// Replaces the list from persisted state, dropping duplicates and
	/// truncating to capacity.
	pub fn seed(&self, names: Vec<String>) {
		let mut guard = self.names.lock();
		guard.clear();
		for name in names {
			if !guard.contains(&name) {
				guard.push(name);
			}
		}
		guard.truncate(self.capacity);
	}

	/// Moves `name` to the front and returns the updated list.
	pub fn mark_used(&self, name: &str) -> Vec<String> {
		let mut guard = self.names.lock();
		guard.retain(|existing| existing != name);
		guard.insert(0, name.to_string());
		guard.truncate(self.capacity);
		guard.clone()
	}

	/// Drops names rejected by `keep`. Returns the new list when anything
	/// was removed, `None` when the list is unchanged.
	pub fn retain(&self, keep: impl Fn(&str) -> bool) -> Option<Vec<String>> {
		let mut guard = self.names.lock();
		let before = guard.len();
		guard.retain(|name| keep(name));
		(guard.len() != before).then(|| guard.clone())
	}

	/// Snapshot of the current list, most recent first.
	pub fn names(&self) -> Vec<String> {
		self.names.lock().clone()
	}
}
