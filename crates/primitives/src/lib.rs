//! Core types for digit patterns: digit strings, digit classes, patterns, and the
//! canonical dialplan line format.

/// Fixed-width digit strings and digit sets.
pub mod digit;
/// Error types shared by the pattern crates.
pub mod error;
/// Dialplan line codec.
pub mod line;
/// Digit-class mask elements.
pub mod mask;
/// Patterns, DEF codes, and pattern lines.
pub mod pattern;

pub use digit::{DEFAULT_WIDTH, DigitSet, DigitString};
pub use error::{InvalidDefCode, InvalidRangeError, LineError};
pub use line::{Line, LineFormat};
pub use mask::{Mask, MaskElement};
pub use pattern::{DefCode, Pattern, PatternLine};
