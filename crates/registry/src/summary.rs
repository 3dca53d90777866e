//! Style catalog summaries.
//!
//! A summary is the lightweight pre-scan of one style document: its name,
//! which layer it came from, and the tokens it declares for automatic
//! selection. Summaries are rebuilt wholesale on every catalog reload and
//! never mutated in place.

use std::collections::BTreeSet;

use tinct_style::StructuredMapping;

/// Layer a style definition came from.
///
/// User definitions always take precedence over a same-named bundled one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleOrigin {
	Bundled,
	User,
}

/// One catalog entry: a style name and its declared selection tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSummary {
	pub name: String,
	pub origin: StyleOrigin,
	pub extensions: BTreeSet<String>,
	pub filenames: BTreeSet<String>,
	pub interpreters: BTreeSet<String>,
}

impl StyleSummary {
	/// Summary with no declared tokens.
	pub fn empty(name: impl Into<String>, origin: StyleOrigin) -> Self {
		Self {
			name: name.into(),
			origin,
			extensions: BTreeSet::new(),
			filenames: BTreeSet::new(),
			interpreters: BTreeSet::new(),
		}
	}

	/// Pre-scans a structured mapping, reading only the three token arrays.
	///
	/// The full rule content is deliberately not parsed here; a catalog
	/// reload touches every document and must stay cheap.
	pub fn from_mapping(
		name: impl Into<String>,
		origin: StyleOrigin,
		mapping: &StructuredMapping,
	) -> Self {
		Self {
			name: name.into(),
			origin,
			extensions: string_set(mapping, "extensions"),
			filenames: string_set(mapping, "filenames"),
			interpreters: string_set(mapping, "interpreters"),
		}
	}
}

fn string_set(mapping: &StructuredMapping, key: &str) -> BTreeSet<String> {
	mapping
		.get(key)
		.and_then(serde_json::Value::as_array)
		.map(|items| {
			items
				.iter()
				.filter_map(serde_json::Value::as_str)
				.filter(|token| !token.is_empty())
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default()
}
