use crate::aggregator::{self, ReportSet};
use crate::errors::Result;
use crate::project_catalog::ProjectCatalog;
use crate::report_output::{self, OutputFormat};
use crate::settings::Settings;
use log::info;
use std::path::Path;

pub struct Options<'a> {
	pub format: OutputFormat,
	/// Overrides the project settings when set.
	pub only_mismatched: Option<bool>,
	pub project_directory: &'a Path,
}

/// Reloads the catalog from disk and scans it.
pub fn scan_project(project_directory: &Path, settings: &Settings) -> Result<ReportSet> {
	let catalog = ProjectCatalog::load(project_directory, settings)?;
	let report_set = aggregator::scan_all(&catalog);

	if report_set.is_empty() {
		info!("No shader has default textures.");
	} else {
		info!(
			"{} shader(s) with default textures, {} mismatched.",
			report_set.len(),
			report_set.mismatched().count()
		);
	}

	Ok(report_set)
}

pub fn print_report(
	report_set: &ReportSet,
	format: OutputFormat,
	only_mismatched: bool,
) -> Result<()> {
	let output = report_output::render(report_set, format, only_mismatched)?;
	print!("{}", output);
	if !output.ends_with('\n') {
		println!();
	}
	Ok(())
}

pub fn execute(options: &Options) -> Result<()> {
	let settings = Settings::load(options.project_directory)?;
	let report_set = scan_project(options.project_directory, &settings)?;
	print_report(
		&report_set,
		options.format,
		options.only_mismatched.unwrap_or(settings.only_mismatched),
	)
}
