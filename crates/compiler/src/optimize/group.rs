//! Grouping and per-group fan-out shared by the merge strategies.

use std::hash::Hash;

use defmask_primitives::{Line, PatternLine};
use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxBuildHasher;

/// Lines a strategy treats as one unit.
pub(crate) enum Group {
	/// Pattern lines sharing the strategy's key.
	Patterns(Vec<PatternLine>),
	/// A line the strategy leaves alone.
	Passthrough(Line),
}

#[derive(PartialEq, Eq, Hash)]
enum Slot<K> {
	Keyed(K),
	Alone(usize),
}

/// Groups pattern lines by `key` in first-seen order.
///
/// Raw lines and pattern lines without a key become passthrough groups at
/// their own position.
pub(crate) fn group_by<K, F>(lines: Vec<Line>, key: F) -> Vec<Group>
where
	K: Hash + Eq,
	F: Fn(&PatternLine) -> Option<K>,
{
	let mut groups: IndexMap<Slot<K>, Group, FxBuildHasher> =
		IndexMap::with_capacity_and_hasher(lines.len(), FxBuildHasher);

	for (index, line) in lines.into_iter().enumerate() {
		let line = match line {
			Line::Pattern(pattern) => match key(&pattern) {
				Some(key) => {
					match groups.entry(Slot::Keyed(key)) {
						Entry::Occupied(mut entry) => {
							if let Group::Patterns(members) = entry.get_mut() {
								members.push(pattern);
							}
						}
						Entry::Vacant(entry) => {
							entry.insert(Group::Patterns(vec![pattern]));
						}
					}
					continue;
				}
				None => Line::Pattern(pattern),
			},
			raw @ Line::Raw(_) => raw,
		};

		groups.insert(Slot::Alone(index), Group::Passthrough(line));
	}

	groups.into_values().collect()
}

/// Runs `merge` over every group with more than one member and
/// concatenates the results in group order.
///
/// With the `parallel` feature the groups are merged on the rayon pool;
/// output order is the same either way.
pub(crate) fn merge_groups<F>(groups: Vec<Group>, merge: F) -> Vec<Line>
where
	F: Fn(Vec<PatternLine>) -> Vec<PatternLine> + Sync + Send,
{
	let apply = |group: Group| -> Vec<Line> {
		match group {
			Group::Patterns(members) if members.len() > 1 => merge(members).into_iter().map(Line::Pattern).collect(),
			Group::Patterns(members) => members.into_iter().map(Line::Pattern).collect(),
			Group::Passthrough(line) => vec![line],
		}
	};

	#[cfg(feature = "parallel")]
	let merged: Vec<Vec<Line>> = {
		use rayon::prelude::*;
		groups.into_par_iter().map(apply).collect()
	};

	#[cfg(not(feature = "parallel"))]
	let merged: Vec<Vec<Line>> = groups.into_iter().map(apply).collect();

	merged.into_iter().flatten().collect()
}
