use defmask_primitives::{DigitSet, Line, Mask, MaskElement, Pattern, PatternLine};
use tracing::{debug, trace};

use super::cover::covers_exactly;
use super::group::{group_by, merge_groups};

/// Range positions replaced by a marker, everything else kept.
fn range_template(mask: &[MaskElement]) -> Vec<Option<MaskElement>> {
	mask.iter()
		.map(|&element| match element {
			MaskElement::Range(..) => None,
			MaskElement::Literal(_) | MaskElement::Wildcard => Some(element),
		})
		.collect()
}

/// Unions the ranges of a group sharing one range template.
///
/// All-or-nothing: one non-contiguous position, or a union that would match
/// numbers no member matches, yields `None`.
fn join_ranges(members: &[PatternLine]) -> Option<Pattern> {
	let first = members.first()?;
	let mut merged: Mask = first.pattern.mask().to_vec();

	for (position, element) in first.pattern.mask().iter().enumerate() {
		if !matches!(element, MaskElement::Range(..)) {
			continue;
		}

		let union = members
			.iter()
			.filter_map(|m| m.pattern.mask().get(position))
			.fold(DigitSet::EMPTY, |acc, e| acc | e.digits());

		let Some(joined) = MaskElement::from_set(union) else {
			trace!(position, ?union, "ranges do not join");
			return None;
		};
		merged[position] = joined;
	}

	let candidate = Pattern::new(first.pattern.prefix(), merged);
	if !covers_exactly(members, &candidate) {
		trace!(pattern = %candidate, "joined ranges would widen group");
		return None;
	}

	Some(candidate)
}

fn merge_range_group(members: Vec<PatternLine>) -> Vec<PatternLine> {
	match join_ranges(&members) {
		Some(pattern) => vec![PatternLine::new(members[0].code, pattern)],
		None => members,
	}
}

/// Joins the ranges of lines that differ only inside their range positions,
/// e.g. `933[1-2]XX` and `933[3-5]XX` into `933[1-5]XX`.
pub fn merge_adjacent_ranges(lines: Vec<Line>) -> Vec<Line> {
	if lines.len() <= 1 {
		return lines;
	}

	let before = lines.len();
	let groups = group_by(lines, |line| {
		Some((
			line.code,
			line.pattern.prefix().to_string(),
			range_template(line.pattern.mask()),
		))
	});

	let lines = merge_groups(groups, merge_range_group);
	debug!(before, after = lines.len(), "merged adjacent ranges");
	lines
}
