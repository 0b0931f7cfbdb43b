mod meta;

use self::meta::MetaFile;
use crate::catalog::AssetCatalog;
use crate::errors::{Error, Result};
use crate::parsers::shaderlab;
use crate::settings::Settings;
use crate::types::{
	AssetId, AssetKind, ImporterMetadata, ShaderAsset, ShaderProperty, TextureRef,
};
use globwalk::GlobWalkerBuilder;
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

const SHADER_IMPORTER: &str = "ShaderImporter";

/// Resources shipped with the editor, which have no `.meta` file.
const BUILTIN_RESOURCES: &[(&str, &str)] = &[
	(
		"0000000000000000e000000000000000",
		"Library/unity default resources",
	),
	(
		"0000000000000000f000000000000000",
		"Resources/unity_builtin_extra",
	),
];

/// Catalog backed by the `.meta` files of a project directory.
pub struct ProjectCatalog {
	directory: PathBuf,
	shader_extensions: Vec<String>,

	/// Keyed by asset path, which also gives the enumeration order.
	entries: BTreeMap<String, MetaFile>,
	/// Also covers package and built-in assets, which never appear in `entries`.
	paths_by_guid: HashMap<String, String>,
}

/// Project-relative, `/`-separated path of the asset described by `meta_path`.
fn asset_path(project_directory: &Path, meta_path: &Path) -> Option<String> {
	let relative = meta_path.strip_prefix(project_directory).ok()?;
	let components = relative
		.components()
		.map(|component| component.as_os_str().to_str())
		.collect::<Option<Vec<_>>>()?;
	components
		.join("/")
		.strip_suffix(".meta")
		.map(str::to_string)
}

/// Reads every `.meta` file under `root` matching `patterns`, keyed by asset path.
fn read_meta_files(
	project_directory: &Path,
	root: &Path,
	patterns: &[String],
) -> Result<BTreeMap<String, MetaFile>> {
	let walker = GlobWalkerBuilder::from_patterns(root, patterns)
		.build()
		.map_err(|err| Error::failed_to_read_directory(root, err))?;

	let mut metas = BTreeMap::new();

	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				warn!("{}", err);
				continue;
			}
		};

		if !entry.file_type().is_file() {
			continue;
		}

		let meta_path = entry.path();
		let asset_path = match asset_path(project_directory, meta_path) {
			Some(asset_path) => asset_path,
			None => {
				debug!("Skipping '{}'.", meta_path.to_string_lossy());
				continue;
			}
		};

		let meta = fs::read_to_string(meta_path)
			.map_err(|err| Error::failed_to_read(meta_path, err))
			.and_then(|contents| meta::parse(meta_path, &contents));

		match meta {
			Ok(meta) => {
				metas.insert(asset_path, meta);
			}
			Err(err) => warn!("{}", err.full_message()),
		}
	}

	Ok(metas)
}

impl ProjectCatalog {
	pub fn load(directory: &Path, settings: &Settings) -> Result<Self> {
		let assets_directory = directory.join(&settings.assets_directory);
		fs::metadata(&assets_directory)
			.map_err(|err| Error::failed_to_read_directory(&assets_directory, err))?;

		let mut patterns = vec!["*.meta".to_string()];
		patterns.extend(
			settings
				.ignore_paths
				.iter()
				.map(|pattern| format!("!{}", pattern)),
		);

		let entries = read_meta_files(directory, &assets_directory, &patterns)?;

		// The first asset in path order owns a shared guid.
		let mut paths_by_guid = HashMap::new();
		for (asset_path, meta) in &entries {
			match paths_by_guid.entry(meta.guid.clone()) {
				Entry::Vacant(entry) => {
					entry.insert(asset_path.clone());
				}
				Entry::Occupied(entry) => warn!(
					"Assets '{}' and '{}' share the guid {}, ignoring the latter.",
					entry.get(),
					asset_path,
					meta.guid
				),
			}
		}

		for package_directory in &settings.package_directories {
			let package_directory = directory.join(package_directory);
			if !package_directory.is_dir() {
				continue;
			}

			let packages = read_meta_files(directory, &package_directory, &["*.meta".to_string()])?;
			debug!(
				"Indexed {} package asset(s) in '{}'.",
				packages.len(),
				package_directory.to_string_lossy()
			);
			for (asset_path, meta) in packages {
				paths_by_guid.entry(meta.guid).or_insert(asset_path);
			}
		}

		for (guid, path) in BUILTIN_RESOURCES {
			paths_by_guid
				.entry(guid.to_string())
				.or_insert_with(|| path.to_string());
		}

		Ok(ProjectCatalog {
			directory: directory.to_path_buf(),
			shader_extensions: settings.shader_extensions.clone(),
			entries,
			paths_by_guid,
		})
	}

	fn owns_guid(&self, path: &str, meta: &MetaFile) -> bool {
		self.paths_by_guid.get(&meta.guid).map(String::as_str) == Some(path)
	}

	fn is_shader_path(&self, path: &str) -> bool {
		Path::new(path)
			.extension()
			.and_then(|extension| extension.to_str())
			.map_or(false, |extension| {
				self.shader_extensions
					.iter()
					.any(|candidate| candidate.eq_ignore_ascii_case(extension))
			})
	}
}

impl AssetCatalog for ProjectCatalog {
	fn find_assets_of_kind(&self, kind: AssetKind) -> Vec<AssetId> {
		match kind {
			AssetKind::Shader => self
				.entries
				.iter()
				.filter(|(path, meta)| {
					!meta.folder && self.is_shader_path(path) && self.owns_guid(path, meta)
				})
				.map(|(_, meta)| AssetId(meta.guid.clone()))
				.collect(),
		}
	}

	fn resolve_asset_path(&self, id: &AssetId) -> Option<String> {
		self.paths_by_guid.get(&id.0).cloned()
	}

	fn importer_metadata(&self, path: &str) -> Option<ImporterMetadata> {
		let meta = self.entries.get(path)?;
		if meta.importer.as_deref() != Some(SHADER_IMPORTER) {
			return None;
		}

		let default_textures = meta
			.default_textures
			.iter()
			.filter_map(|(property, guid)| {
				let guid = guid.as_ref()?;
				match self.paths_by_guid.get(guid) {
					Some(texture_path) => Some((
						property.clone(),
						TextureRef::new(AssetId(guid.clone()), texture_path.as_str()),
					)),
					None => {
						debug!(
							"Default texture {} of '{}' references unknown asset {}.",
							property, path, guid
						);
						None
					}
				}
			})
			.collect();

		Some(ImporterMetadata {
			bundle_name: meta.bundle_name.clone(),
			default_textures,
		})
	}

	/// Falls back to the closest enclosing folder that is assigned to a bundle.
	fn bundle_name_for_path(&self, path: &str) -> String {
		let mut current = Some(path);
		while let Some(path) = current {
			if let Some(meta) = self.entries.get(path) {
				if !meta.bundle_name.is_empty() {
					return meta.bundle_name.clone();
				}
			}
			current = path.rfind('/').map(|index| &path[..index]);
		}
		String::new()
	}

	fn shader_property_schema(&self, shader: &ShaderAsset) -> Option<Vec<ShaderProperty>> {
		let path = self.directory.join(&shader.path);
		let code = match fs::read_to_string(&path) {
			Ok(code) => code,
			Err(err) => {
				warn!("{}", Error::failed_to_read(&path, err).full_message());
				return None;
			}
		};

		match shaderlab::parse(&code) {
			Ok(source) => {
				debug!("Parsed shader \"{}\" from '{}'.", source.name, shader.path);
				Some(source.properties)
			}
			Err(err) => {
				warn!("'{}': {}", shader.path, err);
				None
			}
		}
	}
}
