//! Registry event observation.
//!
//! The orchestrator publishes three event shapes; callers depend on that
//! granularity (menus rebuild on catalog changes, the recents submenu on
//! recency changes, open editors re-resolve on override changes).

/// Callbacks emitted by the registry. All methods default to no-ops so
/// observers implement only what they care about.
pub trait RegistryObserver: Send + Sync {
	/// A catalog reload completed and a new snapshot was published.
	fn catalog_changed(&self) {}

	/// A style was marked used and the recency list changed.
	fn recency_changed(&self) {}

	/// A user override was saved, deleted, or restored. The names carry the
	/// pre- and post-operation identity; deletion reports the sentinel
	/// empty style as `new_name`, restore reports both names equal.
	fn override_changed(&self, old_name: &str, new_name: &str) {
		let _ = (old_name, new_name);
	}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RegistryObserver for NullObserver {}
