//! Exactness check for merged groups.
//!
//! Per-position unions can describe more numbers than the group they came
//! from: `12` and `23` union to `[1-2][2-3]`, which also matches `13` and
//! `22`. A merge is only committed when the members cover the merged
//! pattern completely.

use defmask_primitives::pattern::DigitSets;
use defmask_primitives::{DigitSet, Pattern, PatternLine};
use smallvec::SmallVec;

/// Returns true if every digit string matched by `target` is matched by at
/// least one of `parts`.
pub fn covers(parts: &[DigitSets], target: &[DigitSet]) -> bool {
	let parts: Vec<&[DigitSet]> = parts.iter().map(|p| p.as_slice()).collect();
	covers_from(&parts, target)
}

fn covers_from(parts: &[&[DigitSet]], target: &[DigitSet]) -> bool {
	let Some((&head, rest)) = target.split_first() else {
		return !parts.is_empty();
	};

	// Digits reaching the same subset of parts share a sub-problem.
	let mut checked: SmallVec<[Vec<usize>; 10]> = SmallVec::new();

	for digit in head.iter() {
		let live: Vec<usize> = parts
			.iter()
			.enumerate()
			.filter(|(_, part)| part.first().is_some_and(|set| set.contains(digit)))
			.map(|(index, _)| index)
			.collect();

		if live.is_empty() {
			return false;
		}
		if checked.contains(&live) {
			continue;
		}

		let tails: Vec<&[DigitSet]> = live.iter().map(|&index| &parts[index][1..]).collect();
		if !covers_from(&tails, rest) {
			return false;
		}
		checked.push(live);
	}

	true
}

/// Returns true if `members` together match every number of `merged`.
pub(crate) fn covers_exactly(members: &[PatternLine], merged: &Pattern) -> bool {
	let parts: Vec<DigitSets> = members.iter().map(|m| m.pattern.digit_sets()).collect();
	covers(&parts, &merged.digit_sets())
}
