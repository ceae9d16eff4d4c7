//! `defmask` binary.
//!
//! - `decompose`: one range to pattern lines, optionally wrapped in a context
//! - `optimize`: compress an existing context file

mod cli;

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use cli::{Cli, Command};
use defmask_compiler::{Config, Context, DefCode, Line, SourceRange};
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = match &cli.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	debug!(?config, "loaded configuration");

	match cli.command {
		Command::Decompose {
			code,
			from,
			to,
			context,
			level,
		} => decompose(&config, &code, from, to, context, level),
		Command::Optimize { input, output, level } => {
			optimize(&config, input.as_deref(), output.as_deref(), level.unwrap_or(config.level))
		}
	}
}

fn decompose(
	config: &Config,
	code: &str,
	from: String,
	to: String,
	context: Option<String>,
	level: Option<usize>,
) -> anyhow::Result<()> {
	let code: DefCode = code.parse()?;
	let range = SourceRange::new(code, from, to);
	let lines = config.decomposer().compile(&range)?;
	info!(%code, start = %range.start, end = %range.end, patterns = lines.len(), "decomposed range");

	let optimizer = config.optimizer();
	let text = match context {
		Some(name) => {
			let mut context = Context::new(name);
			context.extend(lines);
			optimizer.optimize_text(&context.render(optimizer.format()), level.unwrap_or(config.level))
		}
		None => {
			let lines = lines.into_iter().map(Line::Pattern).collect();
			optimizer.render_lines(&optimizer.optimize(lines, level.unwrap_or(0)))
		}
	};

	std::io::stdout().write_all(text.as_bytes())?;
	Ok(())
}

fn optimize(config: &Config, input: Option<&Path>, output: Option<&Path>, level: usize) -> anyhow::Result<()> {
	let text = match input {
		Some(path) => {
			std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
		}
		None => {
			let mut text = String::new();
			std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
			text
		}
	};

	let optimizer = config.optimizer();
	let before = optimizer.parse_lines(&text).len();
	let optimized = optimizer.optimize_text(&text, level);
	info!(level, before, after = optimized.lines().count(), "optimized context");

	match output {
		Some(path) => {
			std::fs::write(path, optimized).with_context(|| format!("failed to write {}", path.display()))?
		}
		None => std::io::stdout().write_all(optimized.as_bytes())?,
	}

	Ok(())
}
