use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "defmask")]
#[command(about = "Compile numbering ranges into dialplan digit patterns")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// TOML configuration file
	#[arg(long, short = 'c', global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Decompose one range into pattern lines
	Decompose {
		/// Three-digit DEF code
		#[arg(long)]
		code: String,

		/// First number of the range
		#[arg(long)]
		from: String,

		/// Last number of the range
		#[arg(long)]
		to: String,

		/// Wrap the lines in a named context
		#[arg(long, value_name = "NAME")]
		context: Option<String>,

		/// Optimizer passes (overrides the config file)
		#[arg(long, short = 'l')]
		level: Option<usize>,
	},
	/// Optimize a dialplan context file
	Optimize {
		/// Input file (reads stdin if omitted)
		input: Option<PathBuf>,

		/// Output file (writes stdout if omitted)
		#[arg(long, short = 'o', value_name = "FILE")]
		output: Option<PathBuf>,

		/// Optimizer passes (overrides the config file)
		#[arg(long, short = 'l')]
		level: Option<usize>,
	},
}
