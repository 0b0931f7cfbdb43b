use crate::catalog::AssetCatalog;
use crate::introspector::{self, TextureProperty};
use crate::types::{ImporterMetadata, ShaderAsset};

/// A shader with at least one default texture.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderReport {
	pub bundle_name: String,
	pub shader: ShaderAsset,

	properties: Vec<TextureProperty>,
}

impl ShaderReport {
	/// Bound texture properties in declaration order, never empty.
	pub fn properties(&self) -> &[TextureProperty] {
		&self.properties
	}

	pub fn has_mismatch(&self) -> bool {
		self.mismatched_properties().next().is_some()
	}

	pub fn mismatched_properties(&self) -> impl Iterator<Item = &TextureProperty> {
		let bundle_name = self.bundle_name.as_str();
		self.properties
			.iter()
			.filter(move |property| bundles_differ(bundle_name, property.bundle_name()))
	}
}

/// Exact comparison: an unassigned texture under an assigned shader differs.
pub fn bundles_differ(shader_bundle: &str, texture_bundle: &str) -> bool {
	shader_bundle != texture_bundle
}

pub fn build_report(
	catalog: &dyn AssetCatalog,
	shader: &ShaderAsset,
	importer: &ImporterMetadata,
) -> Option<ShaderReport> {
	let properties: Vec<_> = introspector::extract_texture_properties(catalog, shader, importer)
		.into_iter()
		.filter(|property| property.texture().is_some())
		.collect();

	if properties.is_empty() {
		return None;
	}

	Some(ShaderReport {
		bundle_name: importer.bundle_name.clone(),
		shader: shader.clone(),
		properties,
	})
}
