//! Markup validation errors.

use thiserror::Error;

/// Failure to parse a markup template.
///
/// Every variant is fatal: parsing stops at the first problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
	/// An insertion appears inside a tag name
	#[error("insertions are not allowed inside a tag name")]
	InsertionInTagName,

	/// An insertion appears inside an attribute name
	#[error("insertions are not allowed inside an attribute name")]
	InsertionInAttributeName,

	/// A tag name contains a character outside `[A-Za-z0-9-]`
	#[error("invalid character {0:?} in tag name")]
	InvalidTagCharacter(char),

	/// An attribute name contains a character outside `[A-Za-z0-9-]`
	#[error("invalid character {0:?} in attribute name")]
	InvalidAttributeCharacter(char),

	/// An attribute value does not start with a double quote
	#[error("expected a double quote to open the attribute value")]
	ExpectedQuote,

	/// `=` appears with no attribute name before it
	#[error("expected an attribute name before '='")]
	ExpectedAttributeName,

	/// Something other than `=`, `/`, `>` or another name follows an attribute name
	#[error("expected '=' after attribute name, found {0:?}")]
	ExpectedEquals(char),

	/// A closing tag or self-closing tag is malformed
	#[error("expected a closing slash sequence")]
	ExpectedClosingSlash,

	/// Top-level literal text outside of any tag
	#[error("expected an opening tag, found {0:?}")]
	ExpectedOpeningTag(char),

	/// Opening and closing tag names differ
	#[error("closing tag </{end}> does not match opening tag <{start}>")]
	TagMismatch {
		/// The opening tag name
		start: String,
		/// The closing tag name
		end: String,
	},

	/// A backslash immediately precedes an insertion in a quoted value
	#[error("a backslash cannot escape an insertion")]
	BackslashBeforeInsertion,

	/// The template ends inside a tag or quoted value
	#[error("unexpected end of template")]
	UnexpectedEnd,

	/// The literal segments do not interleave with the arguments
	#[error("expected {expected} literal segments for {arguments} arguments, got {actual}")]
	SegmentCountMismatch {
		/// `arguments + 1`
		expected: usize,
		/// Number of arguments supplied
		arguments: usize,
		/// Number of segments supplied
		actual: usize,
	},

	/// A quoted value contains an invalid escape sequence
	#[error("invalid string literal {literal:?}: {reason}")]
	InvalidStringLiteral {
		/// The literal run as written
		literal: String,
		/// Why decoding failed
		reason: String,
	},

	/// An insertion inside quotes has no textual form
	#[error("a {0} cannot be inserted inside a quoted attribute value")]
	UnstringifiableInsertion(&'static str),

	/// Attributes were written on a component tag
	#[error("component tags do not take attributes")]
	ComponentAttributes,

	/// A component closing tag holds something other than a component pointer
	#[error("a component closing tag must hold the component itself, found a {0}")]
	ExpectedComponentPointer(&'static str),
}

/// Result alias for parser operations
pub type ParseResult<T> = Result<T, ParseError>;
