//! Syntax style definitions.
//!
//! A style is a named syntax-highlighting definition: highlight rule groups,
//! outline extraction rules, completion words, file associations, and
//! metadata. This crate owns the typed document model and the advisory
//! validator; catalog management and lookup live in `tinct-registry`.

pub mod document;
pub mod validate;

pub use document::{
	CommentDelimiters, DocumentError, HighlightRule, NONE_STYLE_NAME, OutlineRule, RuleGroup,
	StructuredMapping, StyleDocument, StyleMetadata,
};
pub use validate::{DelimiterSide, OUTLINE_GROUP, ValidationIssue, validate};
