//! In-memory collaborator fakes shared across the crate's tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tinct_style::{HighlightRule, StructuredMapping, StyleDocument};

use crate::events::RegistryObserver;
use crate::provider::{LegacyConverter, SettingsStore, StorageError, StorageProvider};

/// Document with literal keyword rules, for quick content comparisons.
pub(crate) fn rule_doc(keywords: &[&str]) -> StyleDocument {
	StyleDocument {
		keywords: keywords
			.iter()
			.map(|begin| HighlightRule::plain(*begin))
			.collect(),
		..Default::default()
	}
}

/// Mapping for a document declaring the given extensions.
pub(crate) fn extension_mapping(extensions: &[&str]) -> StructuredMapping {
	let mut doc = StyleDocument::default();
	doc.extensions = extensions.iter().map(|ext| ext.to_string()).collect();
	doc.to_mapping()
}

#[derive(Default)]
pub(crate) struct MemoryStorage {
	user: Mutex<BTreeMap<String, StructuredMapping>>,
	bundled: Mutex<BTreeMap<String, StructuredMapping>>,
	reads: AtomicUsize,
	fail_writes: AtomicBool,
	fail_deletes: AtomicBool,
}

impl MemoryStorage {
	pub fn put_user(&self, name: &str, mapping: StructuredMapping) {
		self.user.lock().insert(name.to_string(), mapping);
	}

	pub fn put_bundled(&self, name: &str, mapping: StructuredMapping) {
		self.bundled.lock().insert(name.to_string(), mapping);
	}

	/// Number of document reads served, across both layers.
	pub fn read_count(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	pub fn fail_deletes(&self, fail: bool) {
		self.fail_deletes.store(fail, Ordering::SeqCst);
	}
}

impl StorageProvider for MemoryStorage {
	fn list_user_document_names(&self) -> BTreeSet<String> {
		self.user.lock().keys().cloned().collect()
	}

	fn list_bundled_document_names(&self) -> BTreeSet<String> {
		self.bundled.lock().keys().cloned().collect()
	}

	fn read_document(&self, name: &str) -> Option<StructuredMapping> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		self.user.lock().get(name).cloned()
	}

	fn read_bundled_document(&self, name: &str) -> Option<StructuredMapping> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		self.bundled.lock().get(name).cloned()
	}

	fn write_document(
		&self,
		name: &str,
		document: &StructuredMapping,
	) -> Result<(), StorageError> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(StorageError::Write {
				name: name.to_string(),
				reason: "injected failure".to_string(),
			});
		}
		self.user.lock().insert(name.to_string(), document.clone());
		Ok(())
	}

	fn delete_document(&self, name: &str) -> Result<(), StorageError> {
		if self.fail_deletes.load(Ordering::SeqCst) {
			return Err(StorageError::Delete {
				name: name.to_string(),
				reason: "injected failure".to_string(),
			});
		}
		match self.user.lock().remove(name) {
			Some(_) => Ok(()),
			None => Err(StorageError::Delete {
				name: name.to_string(),
				reason: "no such document".to_string(),
			}),
		}
	}

	fn rename_document(&self, old: &str, new: &str) -> Result<(), StorageError> {
		let mut user = self.user.lock();
		match user.remove(old) {
			Some(mapping) => {
				user.insert(new.to_string(), mapping);
				Ok(())
			}
			None => Err(StorageError::Rename {
				old: old.to_string(),
				new: new.to_string(),
				reason: "no such document".to_string(),
			}),
		}
	}

	fn document_exists(&self, name: &str) -> bool {
		self.user.lock().contains_key(name)
	}
}

#[derive(Default)]
pub(crate) struct MemorySettings {
	recents: Mutex<Vec<String>>,
	writes: AtomicUsize,
}

impl MemorySettings {
	pub fn with_recents(names: &[&str]) -> Self {
		Self {
			recents: Mutex::new(names.iter().map(|name| name.to_string()).collect()),
			writes: AtomicUsize::new(0),
		}
	}

	pub fn write_count(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}
}

impl SettingsStore for MemorySettings {
	fn recent_style_names(&self) -> Vec<String> {
		self.recents.lock().clone()
	}

	fn set_recent_style_names(&self, names: &[String]) {
		self.writes.fetch_add(1, Ordering::SeqCst);
		*self.recents.lock() = names.to_vec();
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
	Catalog,
	Recency,
	Override { old: String, new: String },
}

#[derive(Default)]
pub(crate) struct RecordingObserver {
	events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
	pub fn events(&self) -> Vec<Event> {
		self.events.lock().clone()
	}

	pub fn clear(&self) {
		self.events.lock().clear();
	}
}

impl RegistryObserver for RecordingObserver {
	fn catalog_changed(&self) {
		self.events.lock().push(Event::Catalog);
	}

	fn recency_changed(&self) {
		self.events.lock().push(Event::Recency);
	}

	fn override_changed(&self, old_name: &str, new_name: &str) {
		self.events.lock().push(Event::Override {
			old: old_name.to_string(),
			new: new_name.to_string(),
		});
	}
}

/// Converter accepting UTF-8 JSON objects, renaming the legacy extension
/// key and dropping the obsolete identity field.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct JsonLegacyConverter;

impl LegacyConverter for JsonLegacyConverter {
	fn convert_legacy_document(&self, raw: &[u8]) -> Option<StructuredMapping> {
		let value: serde_json::Value = serde_json::from_slice(raw).ok()?;
		let serde_json::Value::Object(mut mapping) = value else {
			return None;
		};
		if let Some(extensions) = mapping.remove("fileExtensions") {
			mapping.insert("extensions".to_string(), extensions);
		}
		mapping.remove("legacyIdentifier");
		Some(mapping)
	}
}
