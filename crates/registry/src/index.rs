//! Mapping index construction.
//!
//! The index maps selection tokens (file extensions, exact filenames,
//! interpreter names) to the style that should win them, and records every
//! contested token so ambiguity stays discoverable.
//!
//! # Precedence
//!
//! Styles are processed in ascending case-insensitive name order with all
//! bundled-origin styles moved to the end of that order (their relative
//! order preserved). The first style to claim a token keeps it; later
//! claimants are appended to the token's conflict record, the incumbent
//! winner heading the list. A user style therefore always beats a bundled
//! style for a shared token, and among user styles the alphabetically
//! earlier name wins.
//!
//! The builder is a pure function of the summary catalog; it is re-run
//! wholesale on every catalog change and keeps no hidden state.

use rustc_hash::FxHashMap;

use crate::summary::{StyleOrigin, StyleSummary};

/// Token kind a mapping table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
	Extension,
	Filename,
	Interpreter,
}

impl MappingKind {
	pub const ALL: [MappingKind; 3] = [
		MappingKind::Extension,
		MappingKind::Filename,
		MappingKind::Interpreter,
	];

	pub fn label(self) -> &'static str {
		match self {
			MappingKind::Extension => "extension",
			MappingKind::Filename => "filename",
			MappingKind::Interpreter => "interpreter",
		}
	}
}

/// Token to winning style name, for one token kind.
pub type MappingTable = FxHashMap<String, String>;

/// Full contention set for one token: the winner first, then every other
/// contender in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConflict {
	pub token: String,
	pub contenders: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct KindIndex {
	table: MappingTable,
	contested: FxHashMap<String, Vec<String>>,
}

impl KindIndex {
	fn claim(&mut self, token: &str, name: &str) {
		match self.table.get(token) {
			None => {
				self.table.insert(token.to_string(), name.to_string());
			}
			Some(winner) => {
				let list = self
					.contested
					.entry(token.to_string())
					.or_insert_with(|| vec![winner.clone()]);
				list.push(name.to_string());
			}
		}
	}

	fn conflicts(&self) -> Vec<MappingConflict> {
		let mut conflicts: Vec<MappingConflict> = self
			.contested
			.iter()
			.map(|(token, contenders)| MappingConflict {
				token: token.clone(),
				contenders: contenders.clone(),
			})
			.collect();
		conflicts.sort_by(|a, b| a.token.cmp(&b.token));
		conflicts
	}
}

/// The three lookup tables plus conflict records, built from a summary
/// catalog.
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
	extensions: KindIndex,
	filenames: KindIndex,
	interpreters: KindIndex,
}

impl MappingIndex {
	/// Builds the index from the full catalog.
	pub fn build(summaries: &[StyleSummary]) -> Self {
		let mut order: Vec<&StyleSummary> = summaries.iter().collect();
		order.sort_by(|a, b| {
			a.name
				.to_lowercase()
				.cmp(&b.name.to_lowercase())
				.then_with(|| a.name.cmp(&b.name))
		});
		// Stable sort: bundled styles yield to every user style while keeping
		// their relative lexical order.
		order.sort_by_key(|summary| summary.origin == StyleOrigin::Bundled);

		let mut index = MappingIndex::default();
		for summary in order {
			for token in &summary.extensions {
				index.extensions.claim(token, &summary.name);
			}
			for token in &summary.filenames {
				index.filenames.claim(token, &summary.name);
			}
			for token in &summary.interpreters {
				index.interpreters.claim(token, &summary.name);
			}
		}
		index
	}

	fn kind(&self, kind: MappingKind) -> &KindIndex {
		match kind {
			MappingKind::Extension => &self.extensions,
			MappingKind::Filename => &self.filenames,
			MappingKind::Interpreter => &self.interpreters,
		}
	}

	/// The winning style for a token, if any style declares it.
	pub fn lookup(&self, kind: MappingKind, token: &str) -> Option<&str> {
		self.kind(kind).table.get(token).map(String::as_str)
	}

	/// The full table for one token kind.
	pub fn table(&self, kind: MappingKind) -> &MappingTable {
		&self.kind(kind).table
	}

	/// Contested tokens for one kind, sorted by token.
	pub fn conflicts(&self, kind: MappingKind) -> Vec<MappingConflict> {
		self.kind(kind).conflicts()
	}
}
