//! Style document model.
//!
//! A style document is the full typed content of one syntax style: highlight
//! rule groups, outline extraction rules, completion words, the file
//! associations used for automatic selection, comment delimiters, and
//! provenance metadata. Documents are immutable once published; editing
//! flows construct a new document and save it as a whole.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured mapping exchanged with the storage layer.
///
/// The on-disk serialization format is owned by the storage provider; the
/// core only ever sees this neutral representation.
pub type StructuredMapping = serde_json::Map<String, serde_json::Value>;

/// Name of the fixed no-highlighting style.
///
/// Never present in a catalog, never cached, always resolvable to the empty
/// document.
pub const NONE_STYLE_NAME: &str = "None";

/// Error for structurally unusable document content.
#[derive(Debug, Error)]
pub enum DocumentError {
	#[error("malformed style document: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Highlight rule categories, in definition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleGroup {
	Keywords,
	Commands,
	Types,
	Attributes,
	Variables,
	Values,
	Numbers,
	Strings,
	Characters,
	Comments,
}

impl RuleGroup {
	pub const ALL: [RuleGroup; 10] = [
		RuleGroup::Keywords,
		RuleGroup::Commands,
		RuleGroup::Types,
		RuleGroup::Attributes,
		RuleGroup::Variables,
		RuleGroup::Values,
		RuleGroup::Numbers,
		RuleGroup::Strings,
		RuleGroup::Characters,
		RuleGroup::Comments,
	];

	/// Stable lower-case label, used in validation issues and mappings.
	pub fn label(self) -> &'static str {
		match self {
			RuleGroup::Keywords => "keywords",
			RuleGroup::Commands => "commands",
			RuleGroup::Types => "types",
			RuleGroup::Attributes => "attributes",
			RuleGroup::Variables => "variables",
			RuleGroup::Values => "values",
			RuleGroup::Numbers => "numbers",
			RuleGroup::Strings => "strings",
			RuleGroup::Characters => "characters",
			RuleGroup::Comments => "comments",
		}
	}
}

/// One highlighting rule.
///
/// A rule without `end` highlights a single token; a rule with `end` spans a
/// range. `end: None` and `end: Some("")` are distinct identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightRule {
	pub begin: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub end: Option<String>,
	pub is_regex: bool,
}

impl HighlightRule {
	/// Single-token literal rule.
	pub fn plain(begin: impl Into<String>) -> Self {
		Self {
			begin: begin.into(),
			end: None,
			is_regex: false,
		}
	}

	/// Range rule with begin and end literals.
	pub fn spanning(begin: impl Into<String>, end: impl Into<String>) -> Self {
		Self {
			begin: begin.into(),
			end: Some(end.into()),
			is_regex: false,
		}
	}

	/// Single-token regular-expression rule.
	pub fn regex(begin: impl Into<String>) -> Self {
		Self {
			begin: begin.into(),
			end: None,
			is_regex: true,
		}
	}

	/// Deterministic rule ordering shared by validation and the save path.
	///
	/// Begin strings compare case-insensitively with a case-sensitive
	/// tiebreak; an absent end sorts before any present end, empty included.
	pub fn pattern_cmp(&self, other: &Self) -> Ordering {
		str_cmp_ci(&self.begin, &other.begin).then_with(|| match (&self.end, &other.end) {
			(None, None) => Ordering::Equal,
			(None, Some(_)) => Ordering::Less,
			(Some(_), None) => Ordering::Greater,
			(Some(a), Some(b)) => str_cmp_ci(a, b),
		})
	}
}

/// Case-insensitive string ordering with a case-sensitive tiebreak, so the
/// order stays total over distinct strings.
pub(crate) fn str_cmp_ci(a: &str, b: &str) -> Ordering {
	a.to_lowercase()
		.cmp(&b.to_lowercase())
		.then_with(|| a.cmp(b))
}

/// One document outline extraction rule.
///
/// Outline patterns are always regular expressions; `template` rewrites the
/// match into the displayed outline label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineRule {
	pub pattern: String,
	pub template: String,
	pub ignore_case: bool,
}

/// Comment delimiters: an inline token and an optional block pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentDelimiters {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inline: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub block_begin: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub block_end: Option<String>,
}

impl CommentDelimiters {
	pub fn is_empty(&self) -> bool {
		self.inline.is_none() && self.block_begin.is_none() && self.block_end.is_none()
	}

	/// Collapses empty delimiter strings to absent delimiters.
	fn normalize(&mut self) {
		for slot in [&mut self.inline, &mut self.block_begin, &mut self.block_end] {
			if slot.as_deref() == Some("") {
				*slot = None;
			}
		}
	}
}

/// Style provenance metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleMetadata {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub distribution_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub license: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Full structured content of one style.
///
/// Unknown fields in a stored mapping are ignored and missing fields default
/// to empty, so older or hand-edited documents load without dynamic lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDocument {
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub extensions: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub filenames: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub interpreters: Vec<String>,

	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub keywords: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub commands: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub types: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub attributes: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub variables: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub values: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub numbers: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub strings: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub characters: Vec<HighlightRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub comments: Vec<HighlightRule>,

	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub outline: Vec<OutlineRule>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub completions: Vec<String>,

	#[serde(skip_serializing_if = "CommentDelimiters::is_empty")]
	pub comment_delimiters: CommentDelimiters,
	pub metadata: StyleMetadata,
}

impl StyleDocument {
	/// Rules of one highlight group.
	pub fn rules(&self, group: RuleGroup) -> &[HighlightRule] {
		match group {
			RuleGroup::Keywords => &self.keywords,
			RuleGroup::Commands => &self.commands,
			RuleGroup::Types => &self.types,
			RuleGroup::Attributes => &self.attributes,
			RuleGroup::Variables => &self.variables,
			RuleGroup::Values => &self.values,
			RuleGroup::Numbers => &self.numbers,
			RuleGroup::Strings => &self.strings,
			RuleGroup::Characters => &self.characters,
			RuleGroup::Comments => &self.comments,
		}
	}

	/// Mutable rules of one highlight group.
	pub fn rules_mut(&mut self, group: RuleGroup) -> &mut Vec<HighlightRule> {
		match group {
			RuleGroup::Keywords => &mut self.keywords,
			RuleGroup::Commands => &mut self.commands,
			RuleGroup::Types => &mut self.types,
			RuleGroup::Attributes => &mut self.attributes,
			RuleGroup::Variables => &mut self.variables,
			RuleGroup::Values => &mut self.values,
			RuleGroup::Numbers => &mut self.numbers,
			RuleGroup::Strings => &mut self.strings,
			RuleGroup::Characters => &mut self.characters,
			RuleGroup::Comments => &mut self.comments,
		}
	}

	/// Strips empty entries and applies the deterministic ordering.
	///
	/// Run before every persist so saved documents diff cleanly. Idempotent.
	pub fn sanitize(&mut self) {
		for group in RuleGroup::ALL {
			let rules = self.rules_mut(group);
			rules.retain(|rule| !rule.begin.is_empty());
			rules.sort_by(HighlightRule::pattern_cmp);
		}

		self.outline.retain(|rule| !rule.pattern.is_empty());
		self.outline
			.sort_by(|a, b| str_cmp_ci(&a.pattern, &b.pattern));

		self.completions.retain(|word| !word.is_empty());
		self.completions.sort_by(|a, b| str_cmp_ci(a, b));
		self.completions.dedup();

		for tokens in [
			&mut self.extensions,
			&mut self.filenames,
			&mut self.interpreters,
		] {
			tokens.retain(|token| !token.is_empty());
			tokens.sort_by(|a, b| str_cmp_ci(a, b));
			tokens.dedup();
		}

		self.comment_delimiters.normalize();
	}

	/// Parses a document from a structured mapping.
	pub fn from_mapping(mapping: &StructuredMapping) -> Result<Self, DocumentError> {
		let value = serde_json::Value::Object(mapping.clone());
		Ok(serde_json::from_value(value)?)
	}

	/// Serializes the document to a structured mapping.
	pub fn to_mapping(&self) -> StructuredMapping {
		match serde_json::to_value(self) {
			Ok(serde_json::Value::Object(mapping)) => mapping,
			// Serialize on plain owned data cannot fail or produce a non-map.
			_ => StructuredMapping::new(),
		}
	}
}
