use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::InvalidRangeError;

/// Digit width of a subscriber number behind a DEF code.
pub const DEFAULT_WIDTH: usize = 7;

/// A non-empty string of ASCII decimal digits.
///
/// Digit strings of equal width order lexicographically exactly as their
/// numeric values do, which is what the decomposer relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DigitString(String);

impl DigitString {
	/// Validates `s` as a digit string without changing its width.
	pub fn parse(s: &str) -> Result<Self, InvalidRangeError> {
		if s.is_empty() {
			return Err(InvalidRangeError::Empty);
		}

		if let Some((position, found)) = s.char_indices().find(|(_, ch)| !ch.is_ascii_digit()) {
			return Err(InvalidRangeError::NonDigit {
				value: s.to_string(),
				found,
				position,
			});
		}

		Ok(Self(s.to_string()))
	}

	/// Validates `raw` and left-pads it with zeros to `width`.
	pub fn padded(raw: &str, width: usize) -> Result<Self, InvalidRangeError> {
		let digits = Self::parse(raw)?;
		if digits.width() > width {
			return Err(InvalidRangeError::TooWide {
				value: raw.to_string(),
				width,
			});
		}

		Ok(Self(format!("{:0>width$}", digits.0)))
	}

	/// Renders `value` zero-padded to `width`.
	pub fn from_value(value: u64, width: usize) -> Result<Self, InvalidRangeError> {
		let text = format!("{value:0width$}");
		if text.len() > width {
			return Err(InvalidRangeError::TooWide { value: text, width });
		}

		Ok(Self(text))
	}

	/// Returns the digits as a string slice.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the number of digits.
	#[inline]
	pub fn width(&self) -> usize {
		self.0.len()
	}

	/// Iterates over the numeric value of each digit.
	pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
		self.0.bytes().map(|b| b - b'0')
	}
}

impl FromStr for DigitString {
	type Err = InvalidRangeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for DigitString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for DigitString {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// A set of decimal digits stored as a 10-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet(u16);

impl DigitSet {
	/// The empty set.
	pub const EMPTY: Self = Self(0);
	/// All ten digits.
	pub const FULL: Self = Self(0x03ff);

	/// The set holding only `digit`.
	#[inline]
	pub fn single(digit: u8) -> Self {
		debug_assert!(digit <= 9, "digit out of range: {digit}");
		Self(1 << digit)
	}

	/// The inclusive range `lo..=hi`, empty when `lo > hi`.
	pub fn range(lo: u8, hi: u8) -> Self {
		debug_assert!(lo <= 9 && hi <= 9, "digit out of range: {lo}-{hi}");
		if lo > hi {
			return Self::EMPTY;
		}

		let upper = (1u16 << (hi + 1)) - 1;
		let lower = (1u16 << lo) - 1;
		Self(upper & !lower)
	}

	/// Returns true if `digit` is in the set.
	#[inline]
	pub fn contains(self, digit: u8) -> bool {
		digit <= 9 && self.0 & (1 << digit) != 0
	}

	/// Returns true if every digit of `self` is in `other`.
	#[inline]
	pub fn is_subset(self, other: Self) -> bool {
		self.0 & !other.0 == 0
	}

	/// Returns true if the set has no digits.
	#[inline]
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Number of digits in the set.
	#[inline]
	pub fn len(self) -> u32 {
		self.0.count_ones()
	}

	/// Smallest digit, if any.
	pub fn min(self) -> Option<u8> {
		(!self.is_empty()).then(|| self.0.trailing_zeros() as u8)
	}

	/// Largest digit, if any.
	pub fn max(self) -> Option<u8> {
		(!self.is_empty()).then(|| (15 - self.0.leading_zeros()) as u8)
	}

	/// Returns `(min, max)` when the set is a non-empty contiguous run.
	pub fn bounds(self) -> Option<(u8, u8)> {
		let (lo, hi) = (self.min()?, self.max()?);
		(Self::range(lo, hi) == self).then_some((lo, hi))
	}

	/// Iterates over the digits in ascending order.
	pub fn iter(self) -> impl Iterator<Item = u8> {
		(0..=9).filter(move |&d| self.contains(d))
	}
}

impl BitOr for DigitSet {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		Self(self.0 | rhs.0)
	}
}

impl BitOrAssign for DigitSet {
	fn bitor_assign(&mut self, rhs: Self) {
		self.0 |= rhs.0;
	}
}

impl FromIterator<u8> for DigitSet {
	fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
		iter.into_iter().fold(Self::EMPTY, |set, d| set | Self::single(d))
	}
}

impl fmt::Debug for DigitSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}
