//! Published catalog snapshots.
//!
//! A snapshot is the immutable view the read path works against: the summary
//! catalog plus the mapping index built from it. Rebuilds produce a whole
//! new snapshot that is swapped in atomically; readers pin one snapshot for
//! the duration of a call and never observe a torn update.
//!
//! This module contains no mutation logic.

use rustc_hash::FxHashMap;

use crate::index::{MappingIndex, MappingKind};
use crate::summary::StyleSummary;

/// Name of the style selected for content with an XML prologue.
pub const XML_STYLE_NAME: &str = "XML";

const SHEBANG_MARKER: &str = "#!";
const XML_PROLOGUE: &str = "<?xml ";
const ENV_COMMAND: &str = "env";

/// Immutable catalog state: summaries, name lookup, and the mapping index.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
	summaries: Vec<StyleSummary>,
	by_name: FxHashMap<String, usize>,
	index: MappingIndex,
}

impl CatalogSnapshot {
	/// Builds a snapshot from a summary catalog.
	///
	/// Summaries are kept in ascending case-insensitive name order, which is
	/// also the listing order exposed to callers.
	pub fn new(mut summaries: Vec<StyleSummary>) -> Self {
		summaries.sort_by(|a, b| {
			a.name
				.to_lowercase()
				.cmp(&b.name.to_lowercase())
				.then_with(|| a.name.cmp(&b.name))
		});
		let index = MappingIndex::build(&summaries);
		let by_name = summaries
			.iter()
			.enumerate()
			.map(|(idx, summary)| (summary.name.clone(), idx))
			.collect();
		Self {
			summaries,
			by_name,
			index,
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	pub fn summary(&self, name: &str) -> Option<&StyleSummary> {
		self.by_name.get(name).map(|&idx| &self.summaries[idx])
	}

	/// All summaries in listing order.
	pub fn summaries(&self) -> &[StyleSummary] {
		&self.summaries
	}

	pub fn index(&self) -> &MappingIndex {
		&self.index
	}

	/// Resolves a style from a file name: exact filename match first, then
	/// the substring after the last `.` against the extension table.
	pub fn resolve_file_name(&self, file_name: &str) -> Option<&str> {
		if let Some(name) = self.index.lookup(MappingKind::Filename, file_name) {
			return Some(name);
		}
		let (_, extension) = file_name.rsplit_once('.')?;
		self.index.lookup(MappingKind::Extension, extension)
	}

	/// Resolves a style from document content, inspecting the first line.
	///
	/// A `#!` line selects by interpreter (the final path component of the
	/// first word; a literal `env` defers to the word after it). Without an
	/// interpreter match, content opening with an XML prologue selects the
	/// fixed XML style.
	pub fn resolve_content(&self, content: &str) -> Option<&str> {
		let first_line = content.lines().next().unwrap_or_default();
		if let Some(interpreter) = shebang_interpreter(first_line) {
			if let Some(name) = self.index.lookup(MappingKind::Interpreter, interpreter) {
				return Some(name);
			}
		}
		if content.starts_with(XML_PROLOGUE) {
			return Some(XML_STYLE_NAME);
		}
		None
	}
}

/// Extracts the interpreter name from a shebang line, if there is one.
fn shebang_interpreter(first_line: &str) -> Option<&str> {
	let rest = first_line.strip_prefix(SHEBANG_MARKER)?;
	let mut words = rest
		.trim_start_matches(' ')
		.split(' ')
		.filter(|word| !word.is_empty());
	let command = words.next()?;
	let interpreter = command.rsplit_once('/').map_or(command, |(_, last)| last);
	if interpreter == ENV_COMMAND {
		words.next()
	} else {
		Some(interpreter)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::summary::{StyleOrigin, StyleSummary};

	fn catalog() -> CatalogSnapshot {
		let mut python = StyleSummary::empty("Python", StyleOrigin::Bundled);
		python.extensions = BTreeSet::from(["py".to_string()]);
		python.interpreters = BTreeSet::from(["python3".to_string()]);

		let mut shell = StyleSummary::empty("Shell", StyleOrigin::Bundled);
		shell.extensions = BTreeSet::from(["file".to_string()]);
		shell.interpreters = BTreeSet::from(["bash".to_string()]);

		let mut make = StyleSummary::empty("Makefile", StyleOrigin::Bundled);
		make.filenames = BTreeSet::from(["Makefile".to_string()]);

		CatalogSnapshot::new(vec![python, shell, make])
	}

	#[test]
	fn test_resolve_by_extension() {
		assert_eq!(catalog().resolve_file_name("main.py"), Some("Python"));
	}

	#[test]
	fn test_exact_filename_wins_over_extension() {
		// A style declares the extension "file", but the filename table is
		// consulted first.
		let snapshot = catalog();
		assert_eq!(snapshot.resolve_file_name("Makefile"), Some("Makefile"));
		assert_eq!(snapshot.resolve_file_name("archive.file"), Some("Shell"));
	}

	#[test]
	fn test_resolve_file_name_without_match() {
		let snapshot = catalog();
		assert_eq!(snapshot.resolve_file_name("README"), None);
		assert_eq!(snapshot.resolve_file_name("notes.txt"), None);
	}

	#[test]
	fn test_resolve_content_by_shebang_path() {
		let snapshot = catalog();
		assert_eq!(
			snapshot.resolve_content("#!/bin/bash\necho hi\n"),
			Some("Shell")
		);
	}

	#[test]
	fn test_resolve_content_env_defers_to_next_word() {
		let snapshot = catalog();
		assert_eq!(
			snapshot.resolve_content("#!/usr/bin/env python3\nprint()\n"),
			Some("Python")
		);
		// Leading spaces after the marker are tolerated.
		assert_eq!(
			snapshot.resolve_content("#!  /usr/bin/env   python3\n"),
			Some("Python")
		);
	}

	#[test]
	fn test_resolve_content_no_version_guessing() {
		// Interpreter tokens match verbatim; "python" is not declared.
		let snapshot = catalog();
		assert_eq!(snapshot.resolve_content("#!/usr/bin/env python\n"), None);
	}

	#[test]
	fn test_resolve_content_xml_prologue() {
		let snapshot = catalog();
		assert_eq!(
			snapshot.resolve_content("<?xml version=\"1.0\"?>\n<root/>"),
			Some(XML_STYLE_NAME)
		);
		assert_eq!(snapshot.resolve_content("<html>"), None);
		assert_eq!(snapshot.resolve_content(""), None);
	}

	#[test]
	fn test_summaries_listed_case_insensitively() {
		let snapshot = CatalogSnapshot::new(vec![
			StyleSummary::empty("zsh", StyleOrigin::Bundled),
			StyleSummary::empty("Awk", StyleOrigin::User),
			StyleSummary::empty("make", StyleOrigin::Bundled),
		]);
		let names: Vec<&str> = snapshot
			.summaries()
			.iter()
			.map(|s| s.name.as_str())
			.collect();
		assert_eq!(names, vec!["Awk", "make", "zsh"]);
	}
}
