//! # Line codec
//!
//! Reads and writes pattern lines of a dialplan context:
//!
//! ```text
//! line    = lead code prefix mask trail
//! code    = digit digit digit
//! prefix  = digit*
//! mask    = element*
//! element = digit | "X" | "[" digit "-" digit "]"
//! ```
//!
//! With the default [`LineFormat`] a line reads
//! `exten = _[78]9337704[0-2]XX,1,GoSub(${ARG1},${EXTEN},1)`.
//! Writing a parsed line reproduces it byte for byte.

use crate::error::LineError;
use crate::mask::{Mask, MaskElement};
use crate::pattern::{DefCode, Pattern, PatternLine};


/// Default text in front of the DEF code.
pub const DEFAULT_LEAD: &str = "exten = _[78]";
/// Default text after the mask.
pub const DEFAULT_TRAIL: &str = ",1,GoSub(${ARG1},${EXTEN},1)";

/// One line of a dialplan context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
	/// A line in canonical pattern form.
	Pattern(PatternLine),
	/// Anything else: headers, trailers, unreadable pattern lines.
	Raw(String),
}

impl Line {
	/// Returns the pattern line, if this is one.
	pub fn as_pattern(&self) -> Option<&PatternLine> {
		match self {
			Self::Pattern(line) => Some(line),
			Self::Raw(_) => None,
		}
	}
}

/// The fixed wrapper around pattern bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineFormat {
	/// Text before the DEF code.
	pub lead: String,
	/// Text after the mask.
	pub trail: String,
}

impl Default for LineFormat {
	fn default() -> Self {
		Self {
			lead: DEFAULT_LEAD.to_string(),
			trail: DEFAULT_TRAIL.to_string(),
		}
	}
}

impl LineFormat {
	/// Writes a pattern line.
	pub fn render(&self, line: &PatternLine) -> String {
		format!("{}{}{}", self.lead, line.body(), self.trail)
	}

	/// Writes any line; raw lines are returned verbatim.
	pub fn render_line(&self, line: &Line) -> String {
		match line {
			Line::Pattern(line) => self.render(line),
			Line::Raw(text) => text.clone(),
		}
	}

	/// Parses a canonical pattern line.
	///
	/// # Errors
	///
	/// Returns a [`LineError`] when the wrapper, DEF code, or any mask token
	/// does not match the canonical form.
	pub fn parse(&self, text: &str) -> Result<PatternLine, LineError> {
		let body = text.strip_prefix(self.lead.as_str()).ok_or_else(|| LineError::MissingLead {
			expected: self.lead.clone(),
		})?;
		let body = body.strip_suffix(self.trail.as_str()).ok_or_else(|| LineError::MissingTrail {
			expected: self.trail.clone(),
		})?;

		let code = body
			.get(..3)
			.and_then(|code| code.parse::<DefCode>().ok())
			.ok_or_else(|| LineError::MissingCode { body: body.to_string() })?;

		let rest = &body[3..];
		let split = rest.bytes().take_while(u8::is_ascii_digit).count();
		let (prefix, mask) = rest.split_at(split);

		Ok(PatternLine::new(code, Pattern::new(prefix, parse_mask(mask)?)))
	}

	/// Parses the pattern of a line, returning the empty sentinel pattern
	/// when the line is not in canonical form.
	pub fn parse_pattern(&self, text: &str) -> Pattern {
		self.parse(text).map(|line| line.pattern).unwrap_or_default()
	}

	/// Classifies a line as a pattern line or raw text.
	pub fn classify(&self, text: &str) -> Line {
		match self.parse(text) {
			Ok(line) => Line::Pattern(line),
			Err(_) => Line::Raw(text.to_string()),
		}
	}

	/// Returns true if `text` is laid out as a pattern line, readable or not.
	pub fn is_pattern_text(&self, text: &str) -> bool {
		text.starts_with(self.lead.as_str())
	}

	/// Reads the DEF code right after the lead of an arbitrary line.
	pub fn code_of(&self, text: &str) -> Option<DefCode> {
		text.strip_prefix(self.lead.as_str())?.get(..3)?.parse().ok()
	}
}

/// Parses mask text such as `[0-2]X5`.
///
/// # Errors
///
/// Returns a [`LineError`] at the first unreadable token.
pub fn parse_mask(text: &str) -> Result<Mask, LineError> {
	let mut parser = MaskParser::new(text);
	let mut mask = Mask::new();

	while let Some(element) = parser.element()? {
		mask.push(element);
	}

	Ok(mask)
}

/// Cursor over mask text.
struct MaskParser<'a> {
	/// Remaining bytes.
	input: &'a [u8],
	/// Offset of `input` in the original text.
	position: usize,
}

impl<'a> MaskParser<'a> {
	fn new(text: &'a str) -> Self {
		Self {
			input: text.as_bytes(),
			position: 0,
		}
	}

	fn next(&mut self) -> Option<u8> {
		let (&b, rest) = self.input.split_first()?;
		self.input = rest;
		self.position += 1;
		Some(b)
	}

	fn unexpected(&self, found: Option<u8>) -> LineError {
		LineError::UnexpectedToken {
			found: found.map(char::from),
			position: self.position.saturating_sub(usize::from(found.is_some())),
		}
	}

	fn digit(&mut self) -> Result<u8, LineError> {
		match self.next() {
			Some(b) if b.is_ascii_digit() => Ok(b - b'0'),
			other => Err(self.unexpected(other)),
		}
	}

	fn take(&mut self, expected: u8) -> Result<(), LineError> {
		match self.next() {
			Some(b) if b == expected => Ok(()),
			other => Err(self.unexpected(other)),
		}
	}

	/// Reads one element, `None` at end of input.
	fn element(&mut self) -> Result<Option<MaskElement>, LineError> {
		let Some(b) = self.next() else {
			return Ok(None);
		};

		let element = match b {
			b'X' => MaskElement::Wildcard,
			b'0'..=b'9' => MaskElement::Literal(b - b'0'),
			b'[' => {
				let lo = self.digit()?;
				self.take(b'-')?;
				let hi = self.digit()?;
				self.take(b']')?;
				if lo > hi {
					return Err(LineError::InvertedRange { lo, hi });
				}
				MaskElement::Range(lo, hi)
			}
			other => return Err(self.unexpected(Some(other))),
		};

		Ok(Some(element))
	}
}
