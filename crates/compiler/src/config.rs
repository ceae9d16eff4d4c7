//! TOML configuration for the compiler and optimizer.
//!
//! ```toml
//! width = 7
//! level = 3
//! worklist = "fifo"
//!
//! [format]
//! lead = "exten = _[78]"
//! trail = ",1,GoSub(${ARG1},${EXTEN},1)"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use defmask_primitives::{DEFAULT_WIDTH, LineFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::decompose::{Decomposer, Discipline};
use crate::optimize::Optimizer;

/// Default number of optimizer passes.
pub const DEFAULT_LEVEL: usize = 3;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unknown key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The digit width is zero.
	#[error("width must be at least 1")]
	ZeroWidth,

	/// The line lead is empty, so pattern lines cannot be told apart.
	#[error("format.lead must not be empty")]
	EmptyLead,
}

/// Compiler and optimizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Digit width source bounds are padded to.
	pub width: usize,
	/// Number of optimizer passes.
	pub level: usize,
	/// Worklist discipline of the decomposer.
	pub worklist: Discipline,
	/// Text wrapped around pattern bodies.
	pub format: LineFormat,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			width: DEFAULT_WIDTH,
			level: DEFAULT_LEVEL,
			worklist: Discipline::default(),
			format: LineFormat::default(),
		}
	}
}

impl Config {
	/// Parses and validates a TOML document.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] for malformed TOML, unknown keys, or
	/// invalid values.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML file.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
	/// [`Config::from_toml`].
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml(&text)
	}

	/// Checks values serde cannot.
	///
	/// # Errors
	///
	/// Returns the first invalid value found.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.width == 0 {
			return Err(ConfigError::ZeroWidth);
		}
		if self.format.lead.is_empty() {
			return Err(ConfigError::EmptyLead);
		}
		Ok(())
	}

	/// Builds the configured decomposer.
	pub fn decomposer(&self) -> Decomposer {
		Decomposer::new(self.width, self.worklist)
	}

	/// Builds the configured optimizer.
	pub fn optimizer(&self) -> Optimizer {
		Optimizer::new(self.format.clone())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_is_default() {
		assert_eq!(Config::from_toml("").unwrap(), Config::default());
	}

	#[test]
	fn partial_document_keeps_other_defaults() {
		let config = Config::from_toml(
			r#"
			level = 1
			worklist = "lifo"

			[format]
			lead = "exten = _8"
			"#,
		)
		.unwrap();

		assert_eq!(config.width, DEFAULT_WIDTH);
		assert_eq!(config.level, 1);
		assert_eq!(config.decomposer().discipline(), Discipline::Lifo);
		assert_eq!(config.format.lead, "exten = _8");
		assert_eq!(config.format.trail, LineFormat::default().trail);
	}

	#[test]
	fn rejects_unknown_keys() {
		assert!(matches!(Config::from_toml("passes = 2"), Err(ConfigError::Toml(_))));
		assert!(matches!(Config::from_toml("worklist = \"stack\""), Err(ConfigError::Toml(_))));
	}

	#[test]
	fn rejects_invalid_values() {
		assert!(matches!(Config::from_toml("width = 0"), Err(ConfigError::ZeroWidth)));
		assert!(matches!(
			Config::from_toml("[format]\nlead = \"\""),
			Err(ConfigError::EmptyLead)
		));
	}

	#[test]
	fn load_reports_missing_file() {
		let err = Config::load(Path::new("/nonexistent/defmask.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}
}
