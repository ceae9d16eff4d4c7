use std::collections::BTreeMap;

use defmask_primitives::{DefCode, Line, MaskElement, Pattern, PatternLine};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::debug;

/// Lines that differ only in the digit right before their trailing wildcards.
#[derive(PartialEq, Eq, Hash)]
struct RunKey {
	code: DefCode,
	/// Elements in front of the varying digit.
	base: Vec<MaskElement>,
	/// Number of trailing wildcards.
	wildcards: usize,
}

/// Splits ascending distinct digits into maximal runs of at least two
/// consecutive values.
fn consecutive_runs(digits: impl IntoIterator<Item = u8>) -> Vec<(u8, u8)> {
	let mut runs = Vec::new();
	let mut current: Option<(u8, u8)> = None;

	for digit in digits {
		current = match current {
			Some((first, last)) if digit == last + 1 => Some((first, digit)),
			Some((first, last)) => {
				if last > first {
					runs.push((first, last));
				}
				Some((digit, digit))
			}
			None => Some((digit, digit)),
		};
	}

	if let Some((first, last)) = current {
		if last > first {
			runs.push((first, last));
		}
	}

	runs
}

/// Compresses lines such as `1234XX`, `1235XX`, `1236XX` into `123[4-6]XX`.
///
/// Compressed lines come first, followed by every line not absorbed into a
/// run, in input order.
pub fn compress_sequential_patterns(lines: Vec<Line>) -> Vec<Line> {
	if lines.len() <= 1 {
		return lines;
	}

	let before = lines.len();
	let mut groups: IndexMap<RunKey, BTreeMap<u8, Vec<usize>>, FxBuildHasher> = IndexMap::default();

	for (index, line) in lines.iter().enumerate() {
		let Some(line) = line.as_pattern() else {
			continue;
		};

		let elements: Vec<MaskElement> = line.pattern.elements().collect();
		let wildcards = elements.iter().rev().take_while(|e| e.is_wildcard()).count();
		if wildcards == 0 || wildcards == elements.len() {
			continue;
		}

		let split = elements.len() - wildcards - 1;
		let Some(digit) = elements[split].literal() else {
			continue;
		};

		let key = RunKey {
			code: line.code,
			base: elements[..split].to_vec(),
			wildcards,
		};
		groups
			.entry(key)
			.or_default()
			.entry(digit)
			.or_default()
			.push(index);
	}

	let mut absorbed = vec![false; lines.len()];
	let mut compressed = Vec::new();

	for (key, digits) in groups {
		for (first, last) in consecutive_runs(digits.keys().copied()) {
			for indices in digits.range(first..=last).map(|(_, indices)| indices) {
				for &index in indices {
					absorbed[index] = true;
				}
			}

			let elements = key
				.base
				.iter()
				.copied()
				.chain([MaskElement::from_bounds(first, last)])
				.chain(std::iter::repeat_n(MaskElement::Wildcard, key.wildcards));
			compressed.push(Line::Pattern(PatternLine::new(key.code, Pattern::from_elements(elements))));
		}
	}

	compressed.extend(
		lines
			.into_iter()
			.zip(absorbed)
			.filter_map(|(line, absorbed)| (!absorbed).then_some(line)),
	);

	debug!(before, after = compressed.len(), "compressed sequential patterns");
	compressed
}
