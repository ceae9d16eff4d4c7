use defmask_primitives::pattern::DigitSets;
use defmask_primitives::{DigitSet, Line, Mask, MaskElement, Pattern, PatternLine};
use tracing::{debug, trace};

use super::cover::covers;
use super::group::{group_by, merge_groups};

/// Collapses same-length masks into one mask of per-position unions.
///
/// Every position's union must be a single digit or a contiguous range, and
/// the members must cover the merged mask exactly. Otherwise the masks come
/// back unchanged.
pub fn merge_masks(masks: &[Mask]) -> Vec<Mask> {
	let Some(first) = masks.first() else {
		return Vec::new();
	};
	if masks.len() == 1 {
		return masks.to_vec();
	}
	if masks.iter().any(|mask| mask.len() != first.len()) {
		trace!(count = masks.len(), "mask lengths differ");
		return masks.to_vec();
	}

	let mut merged = Mask::with_capacity(first.len());
	for position in 0..first.len() {
		let union = masks
			.iter()
			.fold(DigitSet::EMPTY, |acc, mask| acc | mask[position].digits());

		match MaskElement::from_set(union) {
			Some(element) => merged.push(element),
			None => {
				trace!(position, ?union, "union is not a contiguous range");
				return masks.to_vec();
			}
		}
	}

	let parts: Vec<DigitSets> = masks
		.iter()
		.map(|mask| mask.iter().map(|e| e.digits()).collect())
		.collect();
	let target: DigitSets = merged.iter().map(|e| e.digits()).collect();
	if !covers(&parts, &target) {
		trace!(count = masks.len(), "union would widen group");
		return masks.to_vec();
	}

	vec![merged]
}

/// Merges lines sharing DEF code, prefix, and mask length, then rewrites
/// every `[0-9]` as `X`.
pub fn union_masks(lines: Vec<Line>) -> Vec<Line> {
	let before = lines.len();
	let groups = group_by(lines, |line| {
		Some((line.code, line.pattern.prefix().to_string(), line.pattern.mask().len()))
	});

	let merged = merge_groups(groups, |members| {
		let masks: Vec<Mask> = members.iter().map(|m| m.pattern.mask().to_vec()).collect();
		match merge_masks(&masks).as_slice() {
			[mask] => vec![PatternLine::new(
				members[0].code,
				Pattern::new(members[0].pattern.prefix(), mask.clone()),
			)],
			_ => members,
		}
	});

	let lines: Vec<Line> = merged
		.into_iter()
		.map(|line| match line {
			Line::Pattern(line) => Line::Pattern(PatternLine::new(line.code, line.pattern.normalized())),
			raw @ Line::Raw(_) => raw,
		})
		.collect();

	debug!(before, after = lines.len(), "merged masks");
	lines
}
