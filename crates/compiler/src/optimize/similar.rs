use defmask_primitives::{Line, Mask, MaskElement, Pattern, PatternLine};
use tracing::debug;

use super::group::{group_by, merge_groups};

/// Merges masks position by position, turning any position where the masks
/// disagree into [`MaskElement::Wildcard`].
///
/// This widens: the result matches at least the union of the inputs and, for
/// disagreeing masks, more. [`merge_similar`] only feeds it groups that agree
/// on every non-wildcard position.
pub fn merge_similar_masks(masks: &[Mask]) -> Mask {
	let Some(first) = masks.first() else {
		return Mask::new();
	};

	first
		.iter()
		.enumerate()
		.map(|(position, &element)| {
			if masks.iter().all(|mask| mask.get(position) == Some(&element)) {
				element
			} else {
				MaskElement::Wildcard
			}
		})
		.collect()
}

/// Wildcard positions replaced by a marker, everything else kept.
fn similarity_key(mask: &[MaskElement]) -> Vec<Option<MaskElement>> {
	mask.iter()
		.map(|&element| match element {
			MaskElement::Wildcard => None,
			MaskElement::Literal(_) | MaskElement::Range(..) => Some(element),
		})
		.collect()
}

/// Merges lines sharing DEF code, prefix, and wildcard layout.
pub fn merge_similar(lines: Vec<Line>) -> Vec<Line> {
	let before = lines.len();
	let groups = group_by(lines, |line| {
		Some((
			line.code,
			line.pattern.prefix().to_string(),
			similarity_key(line.pattern.mask()),
		))
	});

	let lines = merge_groups(groups, |members| {
		let masks: Vec<Mask> = members.iter().map(|m| m.pattern.mask().to_vec()).collect();
		vec![PatternLine::new(
			members[0].code,
			Pattern::new(members[0].pattern.prefix(), merge_similar_masks(&masks)),
		)]
	});

	debug!(before, after = lines.len(), "merged similar masks");
	lines
}
