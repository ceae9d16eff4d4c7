//! Dialplan contexts: one header, the pattern lines of a group, and the fixed
//! trailer lines.
//!
//! ```text
//! [mts_codes]
//! exten = _[78]933770400[0-2],1,GoSub(${ARG1},${EXTEN},1)
//! exten = _XXXX!,1,Return()
//! exten = _XXXX!,2,Hangup()
//! ```

use defmask_primitives::{InvalidRangeError, Line, LineFormat, PatternLine};
use tracing::{debug, warn};

use crate::decompose::{Decomposer, SourceRange};

/// Trailer line returning to the caller.
pub const RETURN_LINE: &str = "exten = _XXXX!,1,Return()";
/// Trailer line hanging up.
pub const HANGUP_LINE: &str = "exten = _XXXX!,2,Hangup()";

/// A named block of pattern lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
	name: String,
	lines: Vec<PatternLine>,
}

impl Context {
	/// Creates an empty context.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			lines: Vec::new(),
		}
	}

	/// Compiles every range into one context. Ranges that fail to decompose
	/// are skipped and returned alongside.
	pub fn compile<'a>(
		name: impl Into<String>,
		ranges: impl IntoIterator<Item = &'a SourceRange>,
		decomposer: &Decomposer,
	) -> (Self, Vec<InvalidRangeError>) {
		let mut context = Self::new(name);
		let mut skipped = Vec::new();

		for range in ranges {
			match decomposer.compile(range) {
				Ok(lines) => context.extend(lines),
				Err(error) => {
					warn!(code = %range.code, start = %range.start, end = %range.end, %error, "skipping range");
					skipped.push(error);
				}
			}
		}

		debug!(context = %context.name, lines = context.lines.len(), skipped = skipped.len(), "compiled context");
		(context, skipped)
	}

	/// Context name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Header line, `[{name}_codes]`.
	pub fn header(&self) -> String {
		format!("[{}_codes]", self.name)
	}

	/// Appends a pattern line.
	pub fn push(&mut self, line: PatternLine) {
		self.lines.push(line);
	}

	/// Appends pattern lines.
	pub fn extend(&mut self, lines: impl IntoIterator<Item = PatternLine>) {
		self.lines.extend(lines);
	}

	/// Pattern lines in insertion order.
	pub fn lines(&self) -> &[PatternLine] {
		&self.lines
	}

	/// Header, pattern lines, and trailers as optimizer input.
	pub fn to_lines(&self) -> Vec<Line> {
		let mut lines = Vec::with_capacity(self.lines.len() + 3);
		lines.push(Line::Raw(self.header()));
		lines.extend(self.lines.iter().cloned().map(Line::Pattern));
		lines.push(Line::Raw(RETURN_LINE.to_string()));
		lines.push(Line::Raw(HANGUP_LINE.to_string()));
		lines
	}

	/// Renders the context, one line per row with a trailing newline.
	pub fn render(&self, format: &LineFormat) -> String {
		self.to_lines().iter().fold(String::new(), |mut out, line| {
			out.push_str(&format.render_line(line));
			out.push('\n');
			out
		})
	}
}
