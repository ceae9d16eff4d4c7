//! # Range decomposition
//!
//! Splits an inclusive interval of equal-width digit strings into patterns
//! whose matched sets are pairwise disjoint and together cover exactly the
//! interval. For `3360000..=3449999`:
//!
//! ```text
//! 33[6-9]XXXX
//! 34[0-4]XXXX
//! ```
//!
//! The split is driven by an explicit worklist of `(common, start, end)`
//! branches instead of recursion. The [`Discipline`] of that worklist only
//! changes the order patterns are emitted in.

use std::collections::VecDeque;

use defmask_primitives::{
	DEFAULT_WIDTH, DefCode, DigitString, InvalidRangeError, Mask, MaskElement, Pattern, PatternLine,
};
use serde::{Deserialize, Serialize};
use tracing::trace;


/// Order in which pending branches are taken from the worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
	/// Oldest branch first. Emits head, middle, tail branches left to right.
	#[default]
	Fifo,
	/// Newest branch first.
	Lifo,
}

/// A pending sub-interval: `common` followed by anything in `start..=end`.
struct Branch {
	common: String,
	start: String,
	end: String,
}

impl Branch {
	fn child(&self, digit: u8, start: String, end: String) -> Self {
		let mut common = self.common.clone();
		common.push(char::from(b'0' + digit));
		Self { common, start, end }
	}
}

/// One row of a numbering plan: a DEF code and raw, unpadded bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRange {
	/// DEF code every resulting pattern is filed under.
	pub code: DefCode,
	/// Lower bound as it appears in the source.
	pub start: String,
	/// Upper bound as it appears in the source.
	pub end: String,
}

impl SourceRange {
	/// Creates a source range.
	pub fn new(code: DefCode, start: impl Into<String>, end: impl Into<String>) -> Self {
		Self {
			code,
			start: start.into(),
			end: end.into(),
		}
	}
}

/// Interval decomposer with a fixed digit width and worklist discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposer {
	width: usize,
	discipline: Discipline,
}

impl Default for Decomposer {
	fn default() -> Self {
		Self::new(DEFAULT_WIDTH, Discipline::default())
	}
}

impl Decomposer {
	/// Creates a decomposer padding source bounds to `width` digits.
	pub fn new(width: usize, discipline: Discipline) -> Self {
		Self { width, discipline }
	}

	/// Configured digit width.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Configured worklist discipline.
	pub fn discipline(&self) -> Discipline {
		self.discipline
	}

	/// Pads the bounds of `range`, decomposes them, and files every pattern
	/// under the range's DEF code.
	///
	/// # Errors
	///
	/// Returns an [`InvalidRangeError`] for non-digit, over-wide, or inverted
	/// bounds.
	pub fn compile(&self, range: &SourceRange) -> Result<Vec<PatternLine>, InvalidRangeError> {
		let start = DigitString::padded(&range.start, self.width)?;
		let end = DigitString::padded(&range.end, self.width)?;

		Ok(self
			.decompose(&start, &end)?
			.into_iter()
			.map(|pattern| PatternLine::new(range.code, pattern))
			.collect())
	}

	/// Decomposes `start..=end` into disjoint patterns covering it exactly.
	///
	/// # Errors
	///
	/// Returns an [`InvalidRangeError`] if the bounds differ in width or
	/// `start > end`.
	pub fn decompose(&self, start: &DigitString, end: &DigitString) -> Result<Vec<Pattern>, InvalidRangeError> {
		if start.width() != end.width() {
			return Err(InvalidRangeError::WidthMismatch {
				start: start.to_string(),
				end: end.to_string(),
			});
		}

		if start > end {
			return Err(InvalidRangeError::Inverted {
				start: start.to_string(),
				end: end.to_string(),
			});
		}

		if start == end {
			return Ok(vec![Pattern::new(start.as_str(), Mask::new())]);
		}

		let (start, end) = (start.as_str(), end.as_str());
		let shared = start.bytes().zip(end.bytes()).take_while(|(s, e)| s == e).count();

		let mut worklist = VecDeque::from([Branch {
			common: start[..shared].to_string(),
			start: start[shared..].to_string(),
			end: end[shared..].to_string(),
		}]);
		let mut patterns = Vec::new();

		while let Some(branch) = self.take(&mut worklist) {
			if let Some(pattern) = self.visit(branch, &mut worklist) {
				patterns.push(pattern.normalized());
			}
		}

		trace!(start, end, count = patterns.len(), "decomposed range");
		Ok(patterns)
	}

	fn take(&self, worklist: &mut VecDeque<Branch>) -> Option<Branch> {
		match self.discipline {
			Discipline::Fifo => worklist.pop_front(),
			Discipline::Lifo => worklist.pop_back(),
		}
	}

	/// Emits a pattern for `branch` or pushes its sub-branches.
	fn visit(&self, branch: Branch, worklist: &mut VecDeque<Branch>) -> Option<Pattern> {
		if branch.start.is_empty() {
			return Some(Pattern::new(branch.common + &branch.end, Mask::new()));
		}
		if branch.end.is_empty() {
			return Some(Pattern::new(branch.common + &branch.start, Mask::new()));
		}

		let s0 = branch.start.as_bytes()[0] - b'0';
		let e0 = branch.end.as_bytes()[0] - b'0';
		let start_tail = &branch.start[1..];
		let end_tail = &branch.end[1..];
		let tail_len = start_tail.len();

		if start_tail.bytes().all(|b| b == b'0') && end_tail.bytes().all(|b| b == b'9') {
			let mut mask = Mask::with_capacity(tail_len + 1);
			mask.push(MaskElement::from_bounds(s0, e0));
			mask.extend(std::iter::repeat_n(MaskElement::Wildcard, tail_len));
			return Some(Pattern::new(branch.common, mask));
		}

		// Equal leading digits: only the tails differ, so descend instead of
		// splitting into overlapping head and tail branches.
		if s0 == e0 {
			worklist.push_back(branch.child(s0, start_tail.to_string(), end_tail.to_string()));
			return None;
		}

		let zeros = "0".repeat(tail_len);
		let nines = "9".repeat(tail_len);

		if s0 != 9 {
			worklist.push_back(branch.child(s0, start_tail.to_string(), nines.clone()));
		}
		for digit in s0 + 1..e0 {
			worklist.push_back(branch.child(digit, zeros.clone(), nines.clone()));
		}
		if e0 != 0 {
			worklist.push_back(branch.child(e0, zeros, end_tail.to_string()));
		}

		None
	}
}

/// Decomposes `start..=end` with the default FIFO worklist.
///
/// # Errors
///
/// See [`Decomposer::decompose`].
pub fn decompose(start: &DigitString, end: &DigitString) -> Result<Vec<Pattern>, InvalidRangeError> {
	Decomposer::default().decompose(start, end)
}

/// Pads and decomposes `range` at `width` digits with the default worklist.
///
/// # Errors
///
/// See [`Decomposer::compile`].
pub fn compile_range(range: &SourceRange, width: usize) -> Result<Vec<PatternLine>, InvalidRangeError> {
	Decomposer::new(width, Discipline::default()).compile(range)
}
