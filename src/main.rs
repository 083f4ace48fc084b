//! # jack-symtab
//!
//! Replays a declaration trace against fresh symbol tables and prints how
//! every `resolve`d name would be addressed by code generation.
//!
//! Usage: `jack-symtab <trace> [config.json]`

use std::{path::PathBuf, process::ExitCode};

use jack_symtab::{replay, setup, Config, Error, UnitResult};
use tracing::{debug, info};

fn main() -> ExitCode {
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("{err}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> UnitResult {
	let mut args = std::env::args_os().skip(1);

	let Some(trace_path) = args.next().map(PathBuf::from) else {
		return Err(Error::Process {
			source: None,
			ctx: "usage: jack-symtab <trace> [config.json]".to_string(),
		});
	};

	let cfg = match args.next().map(PathBuf::from) {
		Some(path) => Config::load(&path)?,
		None => Config::default(),
	};

	setup::logging(cfg.log_level()?);
	debug!("Configuration: {cfg:#?}");
	info!("Replaying trace: {}", trace_path.display());

	let text = std::fs::read_to_string(&trace_path)?;
	let report = replay::replay(&text, &cfg)?;

	for (name, table) in &report.tables {
		debug!("Final table for `{name}`:\n{table}");
	}

	print!("{report}");
	Ok(())
}
