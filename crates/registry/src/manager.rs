//! Style registry orchestration.
//!
//! The registry owns the two-layer catalog. It loads summaries from the
//! storage provider, publishes them with the mapping index as one atomic
//! snapshot, serves parsed documents through the lazy cache, and tracks
//! recently used styles.
//!
//! # Scheduling
//!
//! A dedicated worker thread performs catalog reloads (storage reads,
//! summary pre-scan, index rebuild) and publishes the result with an atomic
//! swap. Public read operations run on the caller's thread against the
//! currently published snapshot and never wait on a reload. Mutations write
//! through storage synchronously, then queue the reload; callers that need
//! the republished catalog pass a completion, which runs on the worker
//! thread after the swap. Queued reloads drain in order and are not
//! cancelled.

use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use arc_swap::ArcSwap;
use tinct_style::{NONE_STYLE_NAME, StructuredMapping, StyleDocument};

use crate::cache::{StyleCache, empty_document};
use crate::error::RegistryError;
use crate::events::RegistryObserver;
use crate::index::{MappingConflict, MappingKind};
use crate::provider::{SettingsStore, StorageProvider};
use crate::recents::{DEFAULT_RECENT_CAPACITY, RecencyTracker};
use crate::snapshot::CatalogSnapshot;
use crate::summary::{StyleOrigin, StyleSummary};

/// Registry construction options.
#[derive(Debug, Clone)]
pub struct RegistryOptions {
	/// Maximum number of names kept in the recency list.
	pub max_recent_styles: usize,
}

impl Default for RegistryOptions {
	fn default() -> Self {
		Self {
			max_recent_styles: DEFAULT_RECENT_CAPACITY,
		}
	}
}

type Completion = Box<dyn FnOnce() + Send>;

struct ReloadJob {
	completion: Option<Completion>,
}

/// State shared between the registry handle and the reload worker.
struct Shared {
	storage: Arc<dyn StorageProvider>,
	settings: Arc<dyn SettingsStore>,
	observer: Arc<dyn RegistryObserver>,
	snapshot: ArcSwap<CatalogSnapshot>,
	cache: StyleCache,
	recents: RecencyTracker,
}

impl Shared {
	/// Re-derives the catalog from storage and publishes a fresh snapshot.
	///
	/// This is the only path that mutates the published index and summaries;
	/// there is no incremental update.
	fn reload_and_publish(&self) {
		let user_names = self.storage.list_user_document_names();
		let bundled_names = self.storage.list_bundled_document_names();

		let mut summaries = Vec::with_capacity(bundled_names.len() + user_names.len());
		for name in &bundled_names {
			// A same-named user document replaces the bundled summary
			// wholesale, never merges with it.
			if user_names.contains(name) {
				continue;
			}
			summaries.push(match self.storage.read_bundled_document(name) {
				Some(mapping) => StyleSummary::from_mapping(name, StyleOrigin::Bundled, &mapping),
				None => StyleSummary::empty(name, StyleOrigin::Bundled),
			});
		}
		for name in &user_names {
			summaries.push(match self.storage.read_document(name) {
				Some(mapping) => StyleSummary::from_mapping(name, StyleOrigin::User, &mapping),
				None => {
					tracing::warn!(
						style = %name,
						"user style document unreadable, keeping the name with no tokens"
					);
					StyleSummary::empty(name, StyleOrigin::User)
				}
			});
		}

		let snapshot = Arc::new(CatalogSnapshot::new(summaries));
		self.snapshot.store(snapshot.clone());

		if let Some(pruned) = self.recents.retain(|name| snapshot.contains(name)) {
			self.settings.set_recent_style_names(&pruned);
		}

		self.observer.catalog_changed();
	}
}

/// Dedicated thread draining queued catalog reloads.
struct ReloadWorker {
	sender: Option<Sender<ReloadJob>>,
	handle: Option<JoinHandle<()>>,
}

impl ReloadWorker {
	fn spawn(shared: Arc<Shared>) -> Self {
		let (sender, receiver) = mpsc::channel::<ReloadJob>();
		let handle = thread::spawn(move || {
			while let Ok(job) = receiver.recv() {
				shared.reload_and_publish();
				if let Some(completion) = job.completion {
					completion();
				}
			}
		});
		Self {
			sender: Some(sender),
			handle: Some(handle),
		}
	}

	fn request(&self, completion: Option<Completion>) {
		let Some(sender) = &self.sender else {
			return;
		};
		if sender.send(ReloadJob { completion }).is_err() {
			tracing::warn!("reload worker is gone, dropping catalog reload request");
		}
	}
}

impl Drop for ReloadWorker {
	fn drop(&mut self) {
		self.sender.take();
		if let Some(handle) = self.handle.take() {
			let _ = handle.join();
		}
	}
}

/// The style catalog orchestrator.
pub struct StyleRegistry {
	shared: Arc<Shared>,
	worker: ReloadWorker,
}

impl StyleRegistry {
	/// Creates a registry and performs the initial catalog load.
	///
	/// The first load runs on the caller's thread so the registry is fully
	/// usable as soon as construction returns; every later reload runs on
	/// the worker.
	pub fn new(
		storage: Arc<dyn StorageProvider>,
		settings: Arc<dyn SettingsStore>,
		observer: Arc<dyn RegistryObserver>,
		options: RegistryOptions,
	) -> Self {
		let recents = RecencyTracker::new(options.max_recent_styles);
		recents.seed(settings.recent_style_names());

		let shared = Arc::new(Shared {
			cache: StyleCache::new(storage.clone()),
			storage,
			settings,
			observer,
			snapshot: ArcSwap::from_pointee(CatalogSnapshot::default()),
			recents,
		});
		shared.reload_and_publish();

		let worker = ReloadWorker::spawn(shared.clone());
		Self { shared, worker }
	}

	/// Resolves a style from a file name (exact filename, then extension).
	pub fn style_for_file(&self, file_name: &str) -> Option<String> {
		self.shared
			.snapshot
			.load()
			.resolve_file_name(file_name)
			.map(str::to_string)
	}

	/// Resolves a style from document content (shebang, then XML prologue).
	pub fn style_for_content(&self, content: &str) -> Option<String> {
		self.shared
			.snapshot
			.load()
			.resolve_content(content)
			.map(str::to_string)
	}

	/// The document to highlight with for `name`, marking the name used.
	///
	/// The sentinel empty style resolves without touching storage, cache, or
	/// recency state.
	pub fn active_document(&self, name: &str) -> Arc<StyleDocument> {
		if name == NONE_STYLE_NAME {
			return empty_document();
		}
		let document = self.shared.cache.get(name);

		let recents = self.shared.recents.mark_used(name);
		self.shared.settings.set_recent_style_names(&recents);
		self.shared.observer.recency_changed();

		document
	}

	/// Persists a style document under `name`.
	///
	/// The document is sanitized (empty entries stripped, deterministic
	/// ordering applied) before it is written. A changed identity moves the
	/// stored document; content identical to the bundled document of the
	/// same name removes the override instead of writing a redundant copy.
	/// The follow-up catalog reload is asynchronous and ends with an
	/// `override_changed(previous, name)` notification.
	pub fn save(
		&self,
		document: StyleDocument,
		name: &str,
		previous_name: Option<&str>,
	) -> Result<(), RegistryError> {
		if name.is_empty() {
			return Err(RegistryError::EmptyName);
		}
		let mut document = document;
		document.sanitize();

		let renamed_from = previous_name.filter(|previous| *previous != name);
		if let Some(previous) = renamed_from {
			if self.shared.storage.document_exists(previous) {
				self.shared.storage.rename_document(previous, name)?;
			}
		}

		if self.matches_bundled(name, &document) {
			// Reverting to shipped content: drop the override so reads fall
			// back to the bundled layer.
			if self.shared.storage.document_exists(name) {
				self.shared.storage.delete_document(name)?;
			}
		} else {
			self.shared
				.storage
				.write_document(name, &document.to_mapping())?;
		}

		self.shared.cache.invalidate(name);
		if let Some(previous) = renamed_from {
			self.shared.cache.invalidate(previous);
		}

		let old_name = previous_name.unwrap_or(name).to_string();
		let new_name = name.to_string();
		let observer = self.shared.observer.clone();
		self.request_reload(Some(Box::new(move || {
			observer.override_changed(&old_name, &new_name);
		})));
		Ok(())
	}

	/// Removes the user override for `name`.
	///
	/// A name absent from the catalog is an error and changes nothing; a
	/// bundled-only name has no override to remove and is a quiet no-op.
	pub fn delete(&self, name: &str) -> Result<(), RegistryError> {
		if !self.shared.snapshot.load().contains(name) {
			return Err(RegistryError::NotFound(name.to_string()));
		}
		if !self.shared.storage.document_exists(name) {
			return Ok(());
		}

		self.shared.storage.delete_document(name)?;
		self.shared.cache.invalidate(name);

		let old_name = name.to_string();
		let observer = self.shared.observer.clone();
		self.request_reload(Some(Box::new(move || {
			observer.override_changed(&old_name, NONE_STYLE_NAME);
		})));
		Ok(())
	}

	/// Discards the user override so the bundled definition is active again.
	pub fn restore_to_bundled(&self, name: &str) -> Result<(), RegistryError> {
		let Some(mapping) = self.shared.storage.read_bundled_document(name) else {
			return Err(RegistryError::NotBundled(name.to_string()));
		};

		if self.shared.storage.document_exists(name) {
			self.shared.storage.delete_document(name)?;
		}

		match StyleDocument::from_mapping(&mapping) {
			Ok(document) => self.shared.cache.seed(name, document),
			Err(err) => {
				tracing::warn!(
					style = name,
					error = %err,
					"bundled document unparsable, dropping the cache entry instead"
				);
				self.shared.cache.invalidate(name);
			}
		}

		let restored = name.to_string();
		let observer = self.shared.observer.clone();
		self.request_reload(Some(Box::new(move || {
			observer.override_changed(&restored, &restored);
		})));
		Ok(())
	}

	/// Imports an already-converted document into the user layer.
	pub fn import_document(
		&self,
		name: &str,
		mapping: &StructuredMapping,
	) -> Result<(), RegistryError> {
		self.write_imported(name, mapping)?;

		let imported = name.to_string();
		let observer = self.shared.observer.clone();
		self.request_reload(Some(Box::new(move || {
			observer.override_changed(&imported, &imported);
		})));
		Ok(())
	}

	/// Queues an asynchronous catalog reload.
	pub fn reload_catalog(&self) {
		self.request_reload(None);
	}

	/// Queues a reload and runs `completion` after the new snapshot is
	/// published. The completion runs on the worker thread.
	pub fn reload_catalog_with(&self, completion: impl FnOnce() + Send + 'static) {
		self.request_reload(Some(Box::new(completion)));
	}

	/// All style names in listing order.
	pub fn style_names(&self) -> Vec<String> {
		self.shared
			.snapshot
			.load()
			.summaries()
			.iter()
			.map(|summary| summary.name.clone())
			.collect()
	}

	/// The catalog summary for `name`.
	pub fn summary(&self, name: &str) -> Option<StyleSummary> {
		self.shared.snapshot.load().summary(name).cloned()
	}

	/// Contested tokens of one kind in the current catalog.
	pub fn conflicts(&self, kind: MappingKind) -> Vec<MappingConflict> {
		self.shared.snapshot.load().index().conflicts(kind)
	}

	/// Recently used style names, most recent first.
	pub fn recent_style_names(&self) -> Vec<String> {
		self.shared.recents.names()
	}

	/// Whether a user override exists for `name`.
	pub fn is_customized(&self, name: &str) -> bool {
		self.shared.storage.document_exists(name)
	}

	pub(crate) fn write_imported(
		&self,
		name: &str,
		mapping: &StructuredMapping,
	) -> Result<(), RegistryError> {
		if name.is_empty() {
			return Err(RegistryError::EmptyName);
		}
		self.shared.storage.write_document(name, mapping)?;
		self.shared.cache.invalidate(name);
		Ok(())
	}

	fn request_reload(&self, completion: Option<Completion>) {
		self.worker.request(completion);
	}

	fn matches_bundled(&self, name: &str, document: &StyleDocument) -> bool {
		let Some(mapping) = self.shared.storage.read_bundled_document(name) else {
			return false;
		};
		match StyleDocument::from_mapping(&mapping) {
			Ok(mut bundled) => {
				bundled.sanitize();
				bundled == *document
			}
			Err(_) => false,
		}
	}
}
