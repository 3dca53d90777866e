//! Collaborator contracts.
//!
//! The core consumes these interfaces and implements none of them: durable
//! document storage, the settings store holding the recency list, and the
//! one-shot legacy converter all live with the embedding application.

use std::collections::BTreeSet;

use thiserror::Error;
use tinct_style::StructuredMapping;

/// A storage operation that failed at the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
	#[error("failed to write style document '{name}': {reason}")]
	Write { name: String, reason: String },

	#[error("failed to delete style document '{name}': {reason}")]
	Delete { name: String, reason: String },

	#[error("failed to rename style document '{old}' to '{new}': {reason}")]
	Rename {
		old: String,
		new: String,
		reason: String,
	},
}

/// Durable document storage for both catalog layers.
///
/// Reads are infallible at this interface: absent or unreadable documents
/// come back as `None` and callers degrade gracefully. Mutations report
/// failures, which leave the in-memory catalog untouched.
pub trait StorageProvider: Send + Sync {
	/// Names with a stored user-layer document.
	fn list_user_document_names(&self) -> BTreeSet<String>;

	/// Names shipped in the read-only bundled layer.
	fn list_bundled_document_names(&self) -> BTreeSet<String>;

	/// The user-layer document for `name`, if present and readable.
	fn read_document(&self, name: &str) -> Option<StructuredMapping>;

	/// The bundled document for `name`, if the bundle ships one.
	fn read_bundled_document(&self, name: &str) -> Option<StructuredMapping>;

	fn write_document(&self, name: &str, document: &StructuredMapping)
	-> Result<(), StorageError>;

	fn delete_document(&self, name: &str) -> Result<(), StorageError>;

	fn rename_document(&self, old: &str, new: &str) -> Result<(), StorageError>;

	/// Whether a user-layer document exists for `name`.
	fn document_exists(&self, name: &str) -> bool;
}

/// Small persisted state the core owns the shape of.
pub trait SettingsStore: Send + Sync {
	/// The persisted recency list, most recent first.
	fn recent_style_names(&self) -> Vec<String>;

	/// Replaces the persisted recency list.
	fn set_recent_style_names(&self, names: &[String]);
}

/// One-shot converter from the legacy document schema.
pub trait LegacyConverter: Send + Sync {
	/// Translates a legacy document into the current schema; `None` marks a
	/// document that cannot be converted.
	fn convert_legacy_document(&self, raw: &[u8]) -> Option<StructuredMapping>;
}
