//! Compiles numbering ranges into dialplan digit patterns and compresses the
//! resulting pattern collections.
//!
//! The flow is one-way: [`decompose`] turns each source interval into
//! disjoint patterns, the patterns of one group key are collected into
//! [`Line`]s, and [`Optimizer`] merges them over a configurable number of
//! passes without changing the set of numbers matched.

/// TOML configuration.
pub mod config;
/// Interval to pattern decomposition.
pub mod decompose;
/// Dialplan context rendering.
pub mod dialplan;
/// Multi-pass pattern optimizer.
pub mod optimize;

pub use config::{Config, ConfigError};
pub use decompose::{Decomposer, Discipline, SourceRange, compile_range, decompose};
pub use defmask_primitives::{
	DEFAULT_WIDTH, DefCode, DigitSet, DigitString, InvalidRangeError, Line, LineError, LineFormat,
	Mask, MaskElement, Pattern, PatternLine,
};
pub use dialplan::Context;
pub use optimize::{Optimizer, optimize};
