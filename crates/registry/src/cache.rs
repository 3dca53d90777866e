//! Lazy style document cache.
//!
//! Parsed documents are loaded on first access and kept until invalidated
//! by a save, delete, or restore. The sentinel empty style never touches
//! storage or the cache.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tinct_style::{NONE_STYLE_NAME, StyleDocument};

use crate::provider::StorageProvider;

static EMPTY_DOCUMENT: Lazy<Arc<StyleDocument>> =
	Lazy::new(|| Arc::new(StyleDocument::default()));

/// The shared empty document backing the sentinel style and failed loads.
pub fn empty_document() -> Arc<StyleDocument> {
	EMPTY_DOCUMENT.clone()
}

/// Lazily populated store of parsed documents, keyed by style name.
pub struct StyleCache {
	storage: Arc<dyn StorageProvider>,
	entries: RwLock<FxHashMap<String, Arc<StyleDocument>>>,
}

impl StyleCache {
	pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
		Self {
			storage,
			entries: RwLock::new(FxHashMap::default()),
		}
	}

	/// The parsed document for `name`, loading it on first access.
	///
	/// Loads read the active layer: the user override when present, else the
	/// bundled document. A name with no retrievable content yields the empty
	/// document rather than an error; callers that need existence check the
	/// catalog first.
	pub fn get(&self, name: &str) -> Arc<StyleDocument> {
		if name == NONE_STYLE_NAME {
			return empty_document();
		}
		if let Some(document) = self.entries.read().get(name) {
			return document.clone();
		}
		let loaded = self.load(name);
		self.entries
			.write()
			.entry(name.to_string())
			.or_insert(loaded)
			.clone()
	}

	/// Installs a document directly, replacing any cached entry.
	pub fn seed(&self, name: &str, document: StyleDocument) {
		self.entries
			.write()
			.insert(name.to_string(), Arc::new(document));
	}

	/// Drops the cached entry for `name`.
	pub fn invalidate(&self, name: &str) {
		self.entries.write().remove(name);
	}

	fn load(&self, name: &str) -> Arc<StyleDocument> {
		let mapping = self
			.storage
			.read_document(name)
			.or_else(|| self.storage.read_bundled_document(name));
		let Some(mapping) = mapping else {
			tracing::debug!(style = name, "no document in either layer, caching empty");
			return empty_document();
		};
		match StyleDocument::from_mapping(&mapping) {
			Ok(document) => Arc::new(document),
			Err(err) => {
				tracing::warn!(
					style = name,
					error = %err,
					"unparsable style document, caching empty"
				);
				empty_document()
			}
		}
	}
}
