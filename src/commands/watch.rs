use super::scan;
use crate::errors::{Error, Result};
use crate::report_output::OutputFormat;
use crate::settings::Settings;
use log::{error, info, warn};
use notify::{DebouncedEvent, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

pub struct Options<'a> {
	pub debounce_delay: Duration,
	pub format: OutputFormat,
	pub only_mismatched: Option<bool>,
	pub project_directory: &'a Path,
}

fn triggers_rescan(event: &DebouncedEvent) -> bool {
	match event {
		DebouncedEvent::Create(_)
		| DebouncedEvent::Write(_)
		| DebouncedEvent::Remove(_)
		| DebouncedEvent::Rename(_, _)
		| DebouncedEvent::Rescan => true,
		DebouncedEvent::Error(err, path) => {
			warn!("Watch error on {:?}: {}", path, err);
			false
		}
		_ => false,
	}
}

fn rescan(options: &Options, settings: &Settings) {
	let only_mismatched = options.only_mismatched.unwrap_or(settings.only_mismatched);
	let result = scan::scan_project(options.project_directory, settings)
		.and_then(|report_set| scan::print_report(&report_set, options.format, only_mismatched));

	// The next change gets another chance.
	if let Err(err) = result {
		error!("{}", err.full_message());
	}
}

pub fn execute(options: &Options) -> Result<()> {
	let settings = Settings::load(options.project_directory)?;
	let assets_directory = options.project_directory.join(&settings.assets_directory);

	let (tx, rx) = channel();
	let mut watcher: RecommendedWatcher = Watcher::new(tx, options.debounce_delay)
		.map_err(|err| Error::failed_to_watch(&assets_directory, err))?;
	watcher
		.watch(&assets_directory, RecursiveMode::Recursive)
		.map_err(|err| Error::failed_to_watch(&assets_directory, err))?;
	info!("Watching '{}'.", assets_directory.to_string_lossy());

	rescan(options, &settings);

	loop {
		let event = rx
			.recv()
			.map_err(|_| Error::message("Watcher stopped unexpectedly."))?;

		if triggers_rescan(&event) {
			info!("Change detected, rescanning.");
			rescan(options, &settings);
		}
	}
}
