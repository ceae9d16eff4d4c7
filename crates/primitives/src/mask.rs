use std::fmt;

use crate::digit::DigitSet;

/// An ordered sequence of digit classes applied after a literal prefix.
pub type Mask = Vec<MaskElement>;

/// A digit class matching one position of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskElement {
	/// Exactly this digit.
	Literal(u8),
	/// Any digit in `lo..=hi`.
	Range(u8, u8),
	/// Any digit, written `X`.
	Wildcard,
}

impl MaskElement {
	/// Builds the narrowest element for `lo..=hi`.
	///
	/// A single digit becomes [`MaskElement::Literal`] and `0..=9` becomes
	/// [`MaskElement::Wildcard`].
	pub fn from_bounds(lo: u8, hi: u8) -> Self {
		debug_assert!(lo <= hi && hi <= 9, "bad digit bounds {lo}-{hi}");
		match (lo, hi) {
			(lo, hi) if lo == hi => Self::Literal(lo),
			(0, 9) => Self::Wildcard,
			(lo, hi) => Self::Range(lo, hi),
		}
	}

	/// Builds the element matching exactly `set`, or `None` when the set is
	/// empty or has gaps.
	pub fn from_set(set: DigitSet) -> Option<Self> {
		set.bounds().map(|(lo, hi)| Self::from_bounds(lo, hi))
	}

	/// The digits this element matches.
	pub fn digits(self) -> DigitSet {
		match self {
			Self::Literal(d) => DigitSet::single(d),
			Self::Range(lo, hi) => DigitSet::range(lo, hi),
			Self::Wildcard => DigitSet::FULL,
		}
	}

	/// Rewrites `[0-9]` as `X`; other elements are unchanged.
	pub fn normalized(self) -> Self {
		match self {
			Self::Range(0, 9) => Self::Wildcard,
			other => other,
		}
	}

	/// Returns true if `digit` matches this element.
	#[inline]
	pub fn matches(self, digit: u8) -> bool {
		self.digits().contains(digit)
	}

	/// Returns the digit of a [`MaskElement::Literal`].
	#[inline]
	pub fn literal(self) -> Option<u8> {
		match self {
			Self::Literal(d) => Some(d),
			Self::Range(..) | Self::Wildcard => None,
		}
	}

	/// Returns true for [`MaskElement::Wildcard`].
	#[inline]
	pub fn is_wildcard(self) -> bool {
		matches!(self, Self::Wildcard)
	}
}

impl fmt::Display for MaskElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(d) => write!(f, "{d}"),
			Self::Range(lo, hi) => write!(f, "[{lo}-{hi}]"),
			Self::Wildcard => f.write_str("X"),
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(3, 3, MaskElement::Literal(3))]
	#[case(0, 9, MaskElement::Wildcard)]
	#[case(2, 7, MaskElement::Range(2, 7))]
	fn from_bounds_picks_narrowest(#[case] lo: u8, #[case] hi: u8, #[case] expected: MaskElement) {
		assert_eq!(MaskElement::from_bounds(lo, hi), expected);
	}

	#[rstest]
	#[case(MaskElement::Literal(4), "4")]
	#[case(MaskElement::Range(0, 2), "[0-2]")]
	#[case(MaskElement::Range(0, 9), "[0-9]")]
	#[case(MaskElement::Wildcard, "X")]
	fn display(#[case] element: MaskElement, #[case] expected: &str) {
		assert_eq!(element.to_string(), expected);
	}

	#[test]
	fn from_set_rejects_gaps() {
		let set: DigitSet = [1, 3].into_iter().collect();
		assert_eq!(MaskElement::from_set(set), None);
		assert_eq!(MaskElement::from_set(DigitSet::EMPTY), None);
		assert_eq!(MaskElement::from_set(DigitSet::range(1, 3)), Some(MaskElement::Range(1, 3)));
	}

	#[test]
	fn normalized_only_touches_full_range() {
		assert_eq!(MaskElement::Range(0, 9).normalized(), MaskElement::Wildcard);
		assert_eq!(MaskElement::Range(0, 8).normalized(), MaskElement::Range(0, 8));
		assert_eq!(MaskElement::Literal(0).normalized(), MaskElement::Literal(0));
	}

	#[test]
	fn wildcard_matches_every_digit() {
		assert!((0..=9).all(|d| MaskElement::Wildcard.matches(d)));
		assert!(MaskElement::Range(2, 4).matches(3));
		assert!(!MaskElement::Range(2, 4).matches(5));
	}
}
