#[macro_use]
extern crate lazy_static;

mod aggregator;
mod catalog;
mod commands {
	pub mod scan;
	pub mod watch;
}
mod detector;
mod errors;
mod introspector;
mod parsers;
mod project_catalog;
mod report_output;
mod settings;
#[cfg(test)]
mod test_catalog;
mod types;

use crate::report_output::OutputFormat;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

#[derive(Debug, Default, StructOpt)]
struct OutputOptions {
	/// Only lists shaders with a default texture in another bundle.
	#[structopt(short, long)]
	only_mismatched: bool,

	/// Lists every shader, even if the settings ask for mismatches only.
	#[structopt(short, long, conflicts_with = "only-mismatched")]
	all: bool,

	/// Output format: text, json or yaml.
	#[structopt(short, long, default_value = "text")]
	format: OutputFormat,
}

impl OutputOptions {
	/// `None` leaves the choice to the project settings.
	fn only_mismatched(&self) -> Option<bool> {
		if self.all {
			Some(false)
		} else if self.only_mismatched {
			Some(true)
		} else {
			None
		}
	}
}

fn parse_debounce_delay(src: &str) -> Result<Duration, String> {
	let seconds = src.parse::<f32>().map_err(|err| err.to_string())?;
	if seconds >= 0.0 && seconds <= u32::MAX as f32 {
		Ok(Duration::from_secs_f32(seconds))
	} else {
		Err(format!("'{}' is not a valid delay in seconds.", src))
	}
}

#[derive(Debug, StructOpt)]
enum Command {
	/// Scans the project once and prints the report (default).
	Scan {
		#[structopt(flatten)]
		output: OutputOptions,
	},
	/// Rescans the project whenever its assets change.
	Watch {
		#[structopt(short, long, default_value = "0.3", parse(try_from_str = parse_debounce_delay))]
		debounce_delay: Duration,

		#[structopt(flatten)]
		output: OutputOptions,
	},
}

impl Default for Command {
	fn default() -> Self {
		Command::Scan {
			output: OutputOptions::default(),
		}
	}
}

#[derive(Debug, StructOpt)]
#[structopt(about)]
struct Args {
	#[structopt(subcommand)]
	command: Option<Command>,

	#[structopt(short, long, default_value = ".")]
	project_directory: PathBuf,

	/// Logs more details, repeat for debug output.
	#[structopt(short, long, parse(from_occurrences))]
	verbose: u8,
}

fn main() -> Result<(), String> {
	let args = Args::from_args();

	let level = match args.verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		_ => LevelFilter::Debug,
	};
	SimpleLogger::new()
		.with_level(level)
		.init()
		.map_err(|err| err.to_string())?;

	let command = args.command.unwrap_or_else(Command::default);
	let result = match command {
		Command::Scan { output } => commands::scan::execute(&commands::scan::Options {
			format: output.format,
			only_mismatched: output.only_mismatched(),
			project_directory: &args.project_directory,
		}),

		Command::Watch {
			debounce_delay,
			output,
		} => commands::watch::execute(&commands::watch::Options {
			debounce_delay,
			format: output.format,
			only_mismatched: output.only_mismatched(),
			project_directory: &args.project_directory,
		}),
	};

	result.map_err(|err| err.full_message())
}
