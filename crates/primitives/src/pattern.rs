use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::digit::DigitSet;
use crate::error::InvalidDefCode;
use crate::mask::{Mask, MaskElement};

/// Per-position digit sets of a pattern, prefix included.
pub type DigitSets = SmallVec<[DigitSet; 10]>;

/// A literal digit prefix followed by a mask of digit classes.
///
/// Patterns are values: merge strategies always build new patterns. The
/// constructor keeps the canonical shape in which the prefix holds every
/// leading literal, so the mask never starts with [`MaskElement::Literal`].
/// That is the shape the line parser reads back, which makes
/// serialization round-trip.
///
/// The default pattern (empty prefix, empty mask) is the sentinel returned
/// for unreadable lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pattern {
	prefix: String,
	mask: Mask,
}

impl Pattern {
	/// Creates a pattern, moving leading literal mask elements into the prefix.
	pub fn new(prefix: impl Into<String>, mask: Mask) -> Self {
		let mut prefix = prefix.into();
		debug_assert!(prefix.bytes().all(|b| b.is_ascii_digit()), "non-digit prefix {prefix:?}");

		let literals = mask.iter().take_while(|e| e.literal().is_some()).count();
		for element in &mask[..literals] {
			if let Some(d) = element.literal() {
				prefix.push(char::from(b'0' + d));
			}
		}

		let mask = if literals == 0 { mask } else { mask[literals..].to_vec() };
		Self { prefix, mask }
	}

	/// Creates a pattern from a full sequence of elements.
	pub fn from_elements(elements: impl IntoIterator<Item = MaskElement>) -> Self {
		Self::new(String::new(), elements.into_iter().collect())
	}

	/// The literal prefix.
	#[inline]
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// The digit classes after the prefix.
	#[inline]
	pub fn mask(&self) -> &[MaskElement] {
		&self.mask
	}

	/// Returns true for the sentinel pattern.
	pub fn is_empty(&self) -> bool {
		self.prefix.is_empty() && self.mask.is_empty()
	}

	/// Total number of positions.
	pub fn width(&self) -> usize {
		self.prefix.len() + self.mask.len()
	}

	/// Every position as an element, prefix digits first.
	pub fn elements(&self) -> impl Iterator<Item = MaskElement> + '_ {
		self.prefix
			.bytes()
			.map(|b| MaskElement::Literal(b - b'0'))
			.chain(self.mask.iter().copied())
	}

	/// Per-position digit sets.
	pub fn digit_sets(&self) -> DigitSets {
		self.elements().map(MaskElement::digits).collect()
	}

	/// Returns true if `number` is matched by this pattern.
	pub fn matches(&self, number: &str) -> bool {
		number.len() == self.width()
			&& number
				.bytes()
				.zip(self.elements())
				.all(|(b, e)| b.is_ascii_digit() && e.matches(b - b'0'))
	}

	/// Number of distinct digit strings matched, saturating at `u64::MAX`.
	pub fn count(&self) -> u64 {
		self.mask
			.iter()
			.fold(1u64, |acc, e| acc.saturating_mul(u64::from(e.digits().len())))
	}

	/// Returns true if every position is a literal digit.
	pub fn is_literal(&self) -> bool {
		self.mask.is_empty()
	}

	/// Rewrites every `[0-9]` as `X`.
	pub fn normalized(&self) -> Self {
		Self {
			prefix: self.prefix.clone(),
			mask: self.mask.iter().map(|e| e.normalized()).collect(),
		}
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.prefix)?;
		self.mask.iter().try_for_each(|e| write!(f, "{e}"))
	}
}

/// The 3-digit DEF code of a mobile numbering block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefCode(u16);

impl DefCode {
	/// Creates a code, `None` above 999.
	pub fn new(code: u16) -> Option<Self> {
		(code <= 999).then_some(Self(code))
	}

	/// Numeric value of the code.
	#[inline]
	pub fn value(self) -> u16 {
		self.0
	}
}

impl FromStr for DefCode {
	type Err = InvalidDefCode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
			return Err(InvalidDefCode(s.to_string()));
		}

		s.parse::<u16>()
			.ok()
			.and_then(Self::new)
			.ok_or_else(|| InvalidDefCode(s.to_string()))
	}
}

impl fmt::Display for DefCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:03}", self.0)
	}
}

/// One canonical dialplan entry: a DEF code and the pattern behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternLine {
	/// Group code the line sorts by.
	pub code: DefCode,
	/// Pattern for the subscriber digits.
	pub pattern: Pattern,
}

impl PatternLine {
	/// Creates a pattern line.
	pub fn new(code: DefCode, pattern: Pattern) -> Self {
		Self { code, pattern }
	}

	/// The text between the line lead and trail, e.g. `93377[6-7]XXXX`.
	pub fn body(&self) -> String {
		format!("{}{}", self.code, self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::mask::MaskElement::{Literal, Range, Wildcard};

	#[test]
	fn new_moves_leading_literals_into_prefix() {
		let pattern = Pattern::new("77", vec![Literal(0), Literal(4), Range(0, 2), Literal(5)]);
		assert_eq!(pattern.prefix(), "7704");
		assert_eq!(pattern.mask(), &[Range(0, 2), Literal(5)]);
		assert_eq!(pattern.to_string(), "7704[0-2]5");
	}

	#[test]
	fn all_literal_pattern_has_empty_mask() {
		let pattern = Pattern::from_elements([Literal(1), Literal(2)]);
		assert_eq!(pattern.prefix(), "12");
		assert!(pattern.is_literal());
		assert_eq!(pattern.count(), 1);
	}

	#[test]
	fn matches_positionally() {
		let pattern = Pattern::new("12", vec![Range(3, 5), Wildcard]);
		assert!(pattern.matches("1230"));
		assert!(pattern.matches("1259"));
		assert!(!pattern.matches("1260"));
		assert!(!pattern.matches("123"));
		assert!(!pattern.matches("12a0"));
		assert_eq!(pattern.count(), 30);
	}

	#[test]
	fn sentinel_is_default() {
		assert!(Pattern::default().is_empty());
		assert!(!Pattern::new("1", Vec::new()).is_empty());
	}

	#[test]
	fn def_code_parse_and_display() {
		let code: DefCode = "093".parse().unwrap();
		assert_eq!(code.value(), 93);
		assert_eq!(code.to_string(), "093");
		assert!("93".parse::<DefCode>().is_err());
		assert!("9a3".parse::<DefCode>().is_err());
		assert_eq!(DefCode::new(1000), None);
	}

	#[test]
	fn line_body_joins_code_and_pattern() {
		let line = PatternLine::new(
			DefCode::new(933).unwrap(),
			Pattern::new("77", vec![Range(6, 7), Wildcard, Wildcard, Wildcard, Wildcard]),
		);
		assert_eq!(line.body(), "93377[6-7]XXXX");
	}
}
