//! Advisory style document validation.
//!
//! Validation is a pure function of a document: it reports duplicate or
//! ambiguous rules, patterns the engine cannot compile, and half-configured
//! block comment delimiters. Issues are data for the caller to surface;
//! they never block a save.

use thiserror::Error;

use crate::document::{HighlightRule, RuleGroup, StyleDocument, str_cmp_ci};

/// Group label reported for outline rule issues.
pub const OUTLINE_GROUP: &str = "outline";

/// One advisory validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
	/// Two rules in the same group share begin and end strings.
	#[error("duplicate rule in the {group} group: '{begin}'")]
	DuplicateRule { group: &'static str, begin: String },

	/// A pattern the engine refused to compile.
	#[error("invalid pattern '{pattern}': {reason}")]
	InvalidPattern { pattern: String, reason: String },

	/// A block comment with only one delimiter configured.
	#[error("block comment is missing its {missing} delimiter")]
	IncompleteDelimiterPair { missing: DelimiterSide },
}

/// Which side of the block comment pair is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterSide {
	Begin,
	End,
}

impl std::fmt::Display for DelimiterSide {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DelimiterSide::Begin => write!(f, "begin"),
			DelimiterSide::End => write!(f, "end"),
		}
	}
}

/// Inspects a document and returns every issue found.
pub fn validate(document: &StyleDocument) -> Vec<ValidationIssue> {
	let mut issues = Vec::new();

	for group in RuleGroup::ALL {
		let mut rules: Vec<&HighlightRule> = document.rules(group).iter().collect();
		rules.sort_by(|a, b| a.pattern_cmp(b));

		for pair in rules.windows(2) {
			if pair[0].begin == pair[1].begin && pair[0].end == pair[1].end {
				issues.push(ValidationIssue::DuplicateRule {
					group: group.label(),
					begin: pair[0].begin.clone(),
				});
			}
		}

		for rule in &rules {
			if !rule.is_regex {
				continue;
			}
			check_pattern(&rule.begin, &mut issues);
			if let Some(end) = &rule.end {
				check_pattern(end, &mut issues);
			}
		}
	}

	// Outline patterns are treated as regular expressions unconditionally.
	let mut outline: Vec<&str> = document
		.outline
		.iter()
		.map(|rule| rule.pattern.as_str())
		.collect();
	outline.sort_by(|a, b| str_cmp_ci(a, b));
	for pair in outline.windows(2) {
		if pair[0] == pair[1] {
			issues.push(ValidationIssue::DuplicateRule {
				group: OUTLINE_GROUP,
				begin: pair[0].to_string(),
			});
		}
	}
	for pattern in &outline {
		check_pattern(pattern, &mut issues);
	}

	// Read begin and end independently; one-sided pairs are incomplete.
	let delimiters = &document.comment_delimiters;
	let has_begin = delimiters
		.block_begin
		.as_deref()
		.is_some_and(|s| !s.is_empty());
	let has_end = delimiters.block_end.as_deref().is_some_and(|s| !s.is_empty());
	match (has_begin, has_end) {
		(true, false) => issues.push(ValidationIssue::IncompleteDelimiterPair {
			missing: DelimiterSide::End,
		}),
		(false, true) => issues.push(ValidationIssue::IncompleteDelimiterPair {
			missing: DelimiterSide::Begin,
		}),
		_ => {}
	}

	issues
}

fn check_pattern(pattern: &str, issues: &mut Vec<ValidationIssue>) {
	if let Err(err) = regex::Regex::new(pattern) {
		issues.push(ValidationIssue::InvalidPattern {
			pattern: pattern.to_string(),
			reason: err.to_string(),
		});
	}
}
