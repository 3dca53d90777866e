//! Layered syntax style catalog.
//!
//! This crate manages named style definitions layered over a read-only
//! bundled set and derives the lookup tables that map a document's file
//! name, extension, or interpreter declaration to the style that should
//! apply.
//!
//! # Architecture
//!
//! * [`summary`]: catalog entries pre-scanned from stored documents
//! * [`index`]: token lookup tables with deterministic conflict resolution
//! * [`snapshot`]: immutable catalog state, published atomically
//! * [`cache`]: lazy, invalidatable store of parsed documents
//! * [`recents`]: bounded most-recently-used style names
//! * [`manager`]: the orchestrator tying the pieces together
//! * [`provider`] / [`events`]: contracts for the storage, settings, legacy
//!   conversion, and notification collaborators the core calls but does not
//!   implement
//!
//! Reads (`style_for_file`, `style_for_content`, `active_document`) run on
//! the caller's thread against the published snapshot; catalog rebuilds run
//! on one background worker and swap the snapshot atomically.

pub mod cache;
pub mod error;
pub mod events;
pub mod index;
pub mod manager;
pub mod migrate;
pub mod provider;
pub mod recents;
pub mod snapshot;
pub mod summary;

pub use cache::{StyleCache, empty_document};
pub use error::RegistryError;
pub use events::{NullObserver, RegistryObserver};
pub use index::{MappingConflict, MappingIndex, MappingKind, MappingTable};
pub use manager::{RegistryOptions, StyleRegistry};
pub use migrate::MigrationReport;
pub use provider::{LegacyConverter, SettingsStore, StorageError, StorageProvider};
pub use recents::{DEFAULT_RECENT_CAPACITY, RecencyTracker};
pub use snapshot::{CatalogSnapshot, XML_STYLE_NAME};
pub use summary::{StyleOrigin, StyleSummary};

#[cfg(test)]
pub(crate) mod test_fixtures;
