use crate::catalog::AssetCatalog;
use crate::types::{
	AssetId, AssetKind, ImporterMetadata, PropertyKind, ShaderAsset, ShaderProperty,
	TextureDimension, TextureRef,
};
use std::collections::BTreeMap;

/// In-memory catalog whose shader enumeration follows insertion order.
#[derive(Default)]
pub struct MemoryCatalog {
	bundles: BTreeMap<String, String>,
	importers: BTreeMap<String, ImporterMetadata>,
	paths: BTreeMap<AssetId, String>,
	schemas: BTreeMap<String, Vec<ShaderProperty>>,
	shaders: Vec<AssetId>,
}

impl MemoryCatalog {
	pub fn add_texture(&mut self, guid: &str, path: &str, bundle_name: &str) -> TextureRef {
		let id = AssetId(guid.to_string());
		self.paths.insert(id.clone(), path.to_string());
		self.bundles
			.insert(path.to_string(), bundle_name.to_string());
		TextureRef::new(id, path)
	}

	pub fn add_shader(
		&mut self,
		guid: &str,
		path: &str,
		bundle_name: &str,
		schema: Vec<ShaderProperty>,
		defaults: Vec<(&str, TextureRef)>,
	) -> ShaderAsset {
		let id = AssetId(guid.to_string());
		self.shaders.push(id.clone());
		self.paths.insert(id.clone(), path.to_string());
		self.bundles
			.insert(path.to_string(), bundle_name.to_string());
		self.importers.insert(
			path.to_string(),
			ImporterMetadata {
				bundle_name: bundle_name.to_string(),
				default_textures: defaults
					.into_iter()
					.map(|(name, texture)| (name.to_string(), texture))
					.collect(),
			},
		);
		self.schemas.insert(path.to_string(), schema);
		ShaderAsset {
			id,
			path: path.to_string(),
		}
	}

	/// Enumerated as a shader but with no importer behind it.
	pub fn add_foreign_asset(&mut self, guid: &str, path: &str) {
		let id = AssetId(guid.to_string());
		self.shaders.push(id.clone());
		self.paths.insert(id, path.to_string());
	}

	/// Enumerated as a shader but with no known path.
	pub fn add_dangling_id(&mut self, guid: &str) {
		self.shaders.push(AssetId(guid.to_string()));
	}

	pub fn forget_schema(&mut self, path: &str) {
		self.schemas.remove(path);
	}
}

impl AssetCatalog for MemoryCatalog {
	fn find_assets_of_kind(&self, kind: AssetKind) -> Vec<AssetId> {
		match kind {
			AssetKind::Shader => self.shaders.clone(),
		}
	}

	fn resolve_asset_path(&self, id: &AssetId) -> Option<String> {
		self.paths.get(id).cloned()
	}

	fn importer_metadata(&self, path: &str) -> Option<ImporterMetadata> {
		self.importers.get(path).cloned()
	}

	fn bundle_name_for_path(&self, path: &str) -> String {
		self.bundles.get(path).cloned().unwrap_or_default()
	}

	fn shader_property_schema(&self, shader: &ShaderAsset) -> Option<Vec<ShaderProperty>> {
		self.schemas.get(&shader.path).cloned()
	}
}

pub fn texture_property(name: &str, display_label: &str) -> ShaderProperty {
	ShaderProperty {
		name: name.to_string(),
		display_label: display_label.to_string(),
		kind: PropertyKind::Texture(TextureDimension::Tex2D),
	}
}

pub fn property(name: &str, kind: PropertyKind) -> ShaderProperty {
	ShaderProperty {
		name: name.to_string(),
		display_label: String::new(),
		kind,
	}
}
