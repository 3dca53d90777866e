//! Bulk legacy style migration.
//!
//! Conversion itself is an external collaborator; the registry only drives
//! it document by document ahead of the standard import path.

use crate::error::RegistryError;
use crate::manager::StyleRegistry;
use crate::provider::LegacyConverter;

/// Outcome of a bulk legacy migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
	/// Names imported into the user layer.
	pub migrated: Vec<String>,
	/// Names whose documents could not be converted.
	pub skipped: Vec<String>,
}

impl StyleRegistry {
	/// Converts legacy documents and imports the survivors.
	///
	/// Individual conversion failures are skipped and reported, never
	/// aborting the run; storage failures abort. Converting nothing out of
	/// a non-empty input is an error so callers can tell "nothing to
	/// migrate" from partial success. One catalog reload covers the whole
	/// batch.
	pub fn migrate_legacy(
		&self,
		converter: &dyn LegacyConverter,
		documents: &[(String, Vec<u8>)],
	) -> Result<MigrationReport, RegistryError> {
		let mut report = MigrationReport::default();

		for (name, raw) in documents {
			if name.is_empty() {
				tracing::warn!("legacy document with an empty name, skipping");
				report.skipped.push(name.clone());
				continue;
			}
			match converter.convert_legacy_document(raw) {
				Some(mapping) => {
					self.write_imported(name, &mapping)?;
					report.migrated.push(name.clone());
				}
				None => {
					tracing::warn!(style = %name, "legacy document conversion failed, skipping");
					report.skipped.push(name.clone());
				}
			}
		}

		if report.migrated.is_empty() && !documents.is_empty() {
			return Err(RegistryError::NothingMigrated);
		}
		if !report.migrated.is_empty() {
			self.reload_catalog();
		}
		Ok(report)
	}
}
