//! Error types for interval bounds and dialplan lines.

use thiserror::Error;

/// Malformed or inverted interval bounds.
///
/// Fatal to the single interval being processed; callers decide whether to
/// skip it and continue with the remaining intervals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
	/// A bound is empty.
	#[error("range bound is empty")]
	Empty,

	/// A bound contains a character that is not an ASCII digit.
	#[error("range bound {value:?} contains non-digit {found:?} at {position}")]
	NonDigit {
		/// The offending bound as given.
		value: String,
		/// The first non-digit character.
		found: char,
		/// Byte offset of `found` in `value`.
		position: usize,
	},

	/// A bound does not fit the configured width.
	#[error("range bound {value:?} is wider than {width} digits")]
	TooWide {
		/// The offending bound as given.
		value: String,
		/// The configured digit width.
		width: usize,
	},

	/// The two bounds have different widths.
	#[error("range bounds {start:?} and {end:?} differ in width")]
	WidthMismatch {
		/// Lower bound.
		start: String,
		/// Upper bound.
		end: String,
	},

	/// The lower bound is greater than the upper bound.
	#[error("range start {start} is greater than end {end}")]
	Inverted {
		/// Lower bound.
		start: String,
		/// Upper bound.
		end: String,
	},
}

/// A DEF code that is not exactly three ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid DEF code {0:?}: expected 3 digits")]
pub struct InvalidDefCode(pub String);

/// A line that is not in the canonical pattern line form.
///
/// The optimizer never surfaces this error: such lines are carried through
/// every stage unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
	/// The line does not start with the configured lead.
	#[error("missing line lead {expected:?}")]
	MissingLead {
		/// The lead the format expects.
		expected: String,
	},

	/// The line does not end with the configured trail.
	#[error("missing line trail {expected:?}")]
	MissingTrail {
		/// The trail the format expects.
		expected: String,
	},

	/// The body does not start with a 3-digit DEF code.
	#[error("missing 3-digit DEF code in {body:?}")]
	MissingCode {
		/// The text between lead and trail.
		body: String,
	},

	/// A mask token could not be read.
	#[error("unexpected {found:?} at mask offset {position}")]
	UnexpectedToken {
		/// The unexpected character, `None` at end of input.
		found: Option<char>,
		/// Byte offset inside the mask text.
		position: usize,
	},

	/// A `[lo-hi]` token with `lo > hi`.
	#[error("inverted digit range [{lo}-{hi}]")]
	InvertedRange {
		/// Lower digit.
		lo: u8,
		/// Upper digit.
		hi: u8,
	},
}
