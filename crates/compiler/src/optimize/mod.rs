//! # Pattern optimizer
//!
//! Compresses a dialplan pattern collection over a number of passes. Each
//! pass runs, in order:
//!
//! 1. [`union_masks`]: same DEF code, prefix, and mask length are unioned
//!    position by position.
//! 2. [`merge_similar`]: masks that agree outside their wildcards collapse.
//! 3. [`compress_sequential_patterns`]: runs like `1XX`, `2XX`, `3XX` become
//!    `[1-3]XX`.
//! 4. [`sort_lines`] by DEF code.
//! 5. [`merge_adjacent_ranges`]: touching ranges in the same position join.
//!
//! A final [`sort_lines`] follows the last pass. No step changes the set of
//! numbers matched by the collection: a group whose union cannot be written
//! exactly is left as it was. Raw lines (headers, trailers, anything the
//! line codec cannot read) are carried through untouched.

use defmask_primitives::{Line, LineFormat};
use tracing::debug;

mod adjacent;
/// Exactness check for merged groups.
pub mod cover;
mod group;
mod masks;
mod sequential;
mod similar;
mod sort;

#[cfg(test)]
mod tests;

pub use adjacent::merge_adjacent_ranges;
pub use masks::{merge_masks, union_masks};
pub use sequential::compress_sequential_patterns;
pub use similar::{merge_similar, merge_similar_masks};
pub use sort::sort_lines;

/// Multi-pass optimizer over dialplan lines.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
	format: LineFormat,
}

impl Optimizer {
	/// Creates an optimizer reading and writing lines in `format`.
	pub fn new(format: LineFormat) -> Self {
		Self { format }
	}

	/// The line format in use.
	pub fn format(&self) -> &LineFormat {
		&self.format
	}

	/// Trims `text` line by line, drops blank lines, and classifies the rest.
	pub fn parse_lines(&self, text: &str) -> Vec<Line> {
		text.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.map(|line| self.format.classify(line))
			.collect()
	}

	/// Renders lines back to text, one per line with a trailing newline.
	pub fn render_lines(&self, lines: &[Line]) -> String {
		lines.iter().fold(String::new(), |mut out, line| {
			out.push_str(&self.format.render_line(line));
			out.push('\n');
			out
		})
	}

	/// Runs a single pass without the final sort.
	pub fn pass(&self, lines: Vec<Line>) -> Vec<Line> {
		let lines = union_masks(lines);
		let lines = merge_similar(lines);
		let lines = compress_sequential_patterns(lines);
		let lines = sort_lines(lines, &self.format);
		merge_adjacent_ranges(lines)
	}

	/// Runs `passes` passes, then sorts. Zero passes only sorts.
	pub fn optimize(&self, lines: Vec<Line>, passes: usize) -> Vec<Line> {
		let mut lines = lines;

		for pass in 0..passes {
			let before = lines.len();
			lines = self.pass(lines);
			debug!(pass, before, after = lines.len(), "optimizer pass");
		}

		sort_lines(lines, &self.format)
	}

	/// Parses `text`, optimizes it, and renders the result.
	pub fn optimize_text(&self, text: &str, passes: usize) -> String {
		let lines = self.optimize(self.parse_lines(text), passes);
		self.render_lines(&lines)
	}
}

/// Optimizes `lines` with the default line format.
pub fn optimize(lines: Vec<Line>, passes: usize) -> Vec<Line> {
	Optimizer::default().optimize(lines, passes)
}
