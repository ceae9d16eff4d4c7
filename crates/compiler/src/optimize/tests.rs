use std::collections::BTreeSet;

use defmask_primitives::line::{DEFAULT_LEAD, DEFAULT_TRAIL};
use defmask_primitives::{DefCode, MaskElement, Pattern, PatternLine};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::decompose::{Decomposer, Discipline, SourceRange};

fn exten(body: &str) -> String {
	format!("{DEFAULT_LEAD}{body}{DEFAULT_TRAIL}")
}

fn parse(lines: &[&str]) -> Vec<Line> {
	let format = LineFormat::default();
	lines.iter().map(|line| format.classify(line)).collect()
}

fn render(lines: &[Line]) -> Vec<String> {
	let format = LineFormat::default();
	lines.iter().map(|line| format.render_line(line)).collect()
}

/// Every `code + number` string matched by the pattern lines.
fn matched(lines: &[Line]) -> BTreeSet<String> {
	lines
		.iter()
		.filter_map(Line::as_pattern)
		.flat_map(|line| {
			line.pattern
				.digit_sets()
				.iter()
				.fold(vec![line.code.to_string()], |acc, set| {
					acc.iter()
						.flat_map(|head| set.iter().map(move |d| format!("{head}{d}")))
						.collect()
				})
		})
		.collect()
}

fn raw_lines(lines: &[Line]) -> Vec<&str> {
	lines
		.iter()
		.filter_map(|line| match line {
			Line::Raw(text) => Some(text.as_str()),
			Line::Pattern(_) => None,
		})
		.collect()
}

#[test]
fn sequential_blocks_collapse_in_one_pass() {
	let lines = parse(&[&exten("9331234XX"), &exten("9331235XX"), &exten("9331236XX")]);
	let optimized = optimize(lines, 1);
	assert_eq!(render(&optimized), vec![exten("933123[4-6]XX")]);
}

#[test]
fn differing_last_digit_unions_to_range() {
	let lines = parse(&[&exten("933[1-2]12"), &exten("933[1-2]13")]);
	let optimized = union_masks(lines);
	assert_eq!(render(&optimized), vec![exten("933[1-2]1[2-3]")]);
}

#[test]
fn full_range_masks_union_to_wildcards() {
	let lines = parse(&[&exten("91234567[0-9]X"), &exten("91234567[1-2]X")]);
	let optimized = union_masks(lines);
	assert_eq!(render(&optimized), vec![exten("91234567XX")]);
}

#[test]
fn union_stage_normalizes_full_ranges() {
	let lines = parse(&[&exten("933[0-9]5")]);
	assert_eq!(render(&union_masks(lines)), vec![exten("933X5")]);
}

#[test]
fn literal_runs_without_wildcards_stay() {
	let lines = parse(&[&exten("912345671"), &exten("912345673")]);
	assert_eq!(compress_sequential_patterns(lines.clone()), lines);
}

#[test]
fn gapped_ranges_stay() {
	let lines = parse(&[&exten("91234567[1-2]"), &exten("91234567[4-5]")]);
	assert_eq!(merge_adjacent_ranges(lines.clone()), lines);
}

#[test]
fn merges_never_cross_def_codes() {
	let lines = parse(&[&exten("9331XX"), &exten("9002XX"), &exten("9003XX")]);
	let optimized = optimize(lines, 2);
	assert_eq!(render(&optimized), vec![exten("900[2-3]XX"), exten("9331XX")]);
}

#[test]
fn duplicates_collapse() {
	let lines = parse(&[&exten("9331234"), &exten("9331234"), &exten("933[1-3]XX"), &exten("933[1-3]XX")]);
	let optimized = optimize(lines, 1);
	assert_eq!(render(&optimized), vec![exten("9331234"), exten("933[1-3]XX")]);
}

#[test]
fn raw_lines_survive_every_stage() {
	let lines = parse(&[
		"exten = _XXXX!,1,Return()",
		&exten("9331XX"),
		"[mts_codes]",
		"exten = _[78]933[1-,1,GoSub(${ARG1},${EXTEN},1)",
		&exten("9332XX"),
		"exten = _XXXX!,2,Hangup()",
	]);

	for stage in [union_masks, merge_similar, compress_sequential_patterns, merge_adjacent_ranges] {
		let out = stage(lines.clone());
		assert_eq!(raw_lines(&out), raw_lines(&lines));
	}

	let optimized = optimize(lines, 3);
	assert_eq!(
		render(&optimized),
		vec![
			"[mts_codes]".to_string(),
			exten("933[1-2]XX"),
			"exten = _[78]933[1-,1,GoSub(${ARG1},${EXTEN},1)".to_string(),
			"exten = _XXXX!,1,Return()".to_string(),
			"exten = _XXXX!,2,Hangup()".to_string(),
		]
	);
}

#[test]
fn empty_collection_stays_empty() {
	assert!(optimize(Vec::new(), 3).is_empty());
	assert!(union_masks(Vec::new()).is_empty());
	assert!(merge_similar(Vec::new()).is_empty());
	assert!(compress_sequential_patterns(Vec::new()).is_empty());
	assert!(merge_adjacent_ranges(Vec::new()).is_empty());
}

#[test]
fn zero_passes_only_sort() {
	let lines = parse(&["tail", &exten("9331XX"), "[head]", &exten("9002XX"), &exten("9003XX")]);
	let sorted = optimize(lines, 0);
	assert_eq!(
		render(&sorted),
		vec![
			"[head]".to_string(),
			exten("9002XX"),
			exten("9003XX"),
			exten("9331XX"),
			"tail".to_string(),
		]
	);
}

#[test]
fn unreadable_pattern_text_sorts_by_code() {
	let lines = parse(&["exten = _[78]999??", "exten = _[78]??", &exten("9331XX"), "exten = _[78]901??"]);
	let sorted = optimize(lines, 0);
	assert_eq!(
		render(&sorted),
		vec![
			"exten = _[78]901??".to_string(),
			exten("9331XX"),
			"exten = _[78]999??".to_string(),
			"exten = _[78]??".to_string(),
		]
	);
}

#[test]
fn single_line_context() {
	let optimizer = Optimizer::default();
	let text = format!("[test_codes]\n\n  {}  \n", exten("912345671"));
	let out = optimizer.optimize_text(&text, 1);
	assert_eq!(out, format!("[test_codes]\n{}\n", exten("912345671")));
}

#[test]
fn decomposed_neighbours_merge() {
	let decomposer = Decomposer::default();
	let code: DefCode = "900".parse().unwrap();
	let lines: Vec<Line> = [("3360000", "3449999"), ("3450000", "3469999")]
		.into_iter()
		.flat_map(|(start, end)| decomposer.compile(&SourceRange::new(code, start, end)).unwrap())
		.map(Line::Pattern)
		.collect();

	let optimized = optimize(lines.clone(), 2);
	assert_eq!(matched(&optimized), matched(&lines));
	assert_eq!(render(&optimized), vec![exten("90033[6-9]XXXX"), exten("90034[0-6]XXXX")]);
}

fn arb_element() -> impl Strategy<Value = MaskElement> {
	prop_oneof![
		(0u8..=9).prop_map(MaskElement::Literal),
		(0u8..=9, 0u8..=9).prop_map(|(a, b)| MaskElement::Range(a.min(b), a.max(b))),
		Just(MaskElement::Wildcard),
	]
}

/// Lines decomposed from random width-3 ranges under two codes.
fn arb_decomposed() -> impl Strategy<Value = Vec<Line>> {
	prop::collection::vec((any::<bool>(), 0u64..1000, 0u64..1000), 1..6).prop_map(|rows| {
		let decomposer = Decomposer::new(3, Discipline::Fifo);
		rows.into_iter()
			.flat_map(|(alt, a, b)| {
				let code = DefCode::new(if alt { 900 } else { 933 }).unwrap();
				let range = SourceRange::new(code, a.min(b).to_string(), a.max(b).to_string());
				decomposer.compile(&range).unwrap()
			})
			.map(Line::Pattern)
			.collect()
	})
}

/// Arbitrary width-3 pattern lines sharing a code and a short prefix.
fn arb_patterns() -> impl Strategy<Value = Vec<Line>> {
	prop::collection::vec(
		("[0-9]{0,1}", prop::collection::vec(arb_element(), 2..=3)),
		1..8,
	)
	.prop_map(|rows| {
		let code = DefCode::new(933).unwrap();
		rows.into_iter()
			.map(|(prefix, mut mask)| {
				mask.truncate(3 - prefix.len());
				Line::Pattern(PatternLine::new(code, Pattern::new(prefix, mask)))
			})
			.collect()
	})
}

proptest! {
	/// Optimizing never changes the set of numbers matched.
	#[test]
	fn prop_equivalence_decomposed(lines in arb_decomposed(), passes in 0usize..4) {
		let optimized = optimize(lines.clone(), passes);
		prop_assert_eq!(matched(&optimized), matched(&lines));
	}

	/// Same for arbitrary overlapping masks.
	#[test]
	fn prop_equivalence_arbitrary(lines in arb_patterns(), passes in 0usize..4) {
		let optimized = optimize(lines.clone(), passes);
		prop_assert_eq!(matched(&optimized), matched(&lines));
	}

	/// A follow-up run with zero passes leaves the output unchanged.
	#[test]
	fn prop_zero_passes_after_optimize_is_noop(lines in arb_decomposed(), passes in 0usize..4) {
		let optimized = optimize(lines, passes);
		prop_assert_eq!(optimize(optimized.clone(), 0), optimized);
	}

	/// Every optimized line renders and parses back to itself.
	#[test]
	fn prop_output_roundtrips(lines in arb_decomposed(), passes in 1usize..4) {
		let format = LineFormat::default();
		for line in optimize(lines, passes) {
			let text = format.render_line(&line);
			prop_assert_eq!(format.classify(&text), line);
		}
	}
}
