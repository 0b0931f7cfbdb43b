use crate::errors::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILENAME: &str = "bundle-audit.yml";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
	/// Relative to the project directory.
	pub assets_directory: PathBuf,
	/// Glob patterns, relative to the assets directory.
	pub ignore_paths: Vec<String>,
	pub only_mismatched: bool,
	/// Relative to the project directory. Only used to resolve referenced assets.
	pub package_directories: Vec<PathBuf>,
	pub shader_extensions: Vec<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			assets_directory: PathBuf::from("Assets"),
			ignore_paths: Vec::new(),
			only_mismatched: false,
			package_directories: vec![
				PathBuf::from("Packages"),
				PathBuf::from("Library/PackageCache"),
			],
			shader_extensions: vec!["shader".to_string()],
		}
	}
}

impl Settings {
	pub fn load(project_directory: &Path) -> Result<Self> {
		let path = project_directory.join(SETTINGS_FILENAME);

		if !path.exists() {
			return Ok(Settings::default());
		}

		let contents = fs::read_to_string(&path).map_err(|err| Error::failed_to_read(&path, err))?;
		let settings: Settings = serde_yaml::from_str(&contents)
			.map_err(|err| Error::failed_to_deserialize(&path, err))?;
		Ok(settings)
	}
}
