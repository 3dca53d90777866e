//! Registry error taxonomy.

use thiserror::Error;

use crate::provider::StorageError;

/// Errors surfaced by registry operations.
///
/// Advisory validation issues are not errors; they are returned as data by
/// `tinct_style::validate` and never block a save.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// The requested style name is not in the catalog.
	#[error("no style named '{0}' in the catalog")]
	NotFound(String),

	/// Styles are saved under non-empty names only.
	#[error("style name must not be empty")]
	EmptyName,

	/// Restore requires a bundled counterpart.
	#[error("style '{0}' has no bundled definition")]
	NotBundled(String),

	/// A storage mutation failed; the published catalog, cache, and recency
	/// state are unchanged.
	#[error(transparent)]
	Storage(#[from] StorageError),

	/// A bulk migration over a non-empty input converted nothing.
	#[error("no legacy style documents could be converted")]
	NothingMigrated,
}
