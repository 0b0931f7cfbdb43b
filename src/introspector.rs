use crate::catalog::AssetCatalog;
use crate::types::{ImporterMetadata, PropertyKind, ShaderAsset, TextureDimension, TextureRef};

/// A texture slot declared by a shader, with the default texture its importer binds to it.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureProperty {
	pub property_name: String,
	pub display_name: String,
	pub dimension: TextureDimension,

	texture: Option<TextureRef>,
	bundle_name: String,
}

impl TextureProperty {
	pub fn texture(&self) -> Option<&TextureRef> {
		self.texture.as_ref()
	}

	/// Bundle of the bound texture, empty when unbound or unassigned.
	pub fn bundle_name(&self) -> &str {
		&self.bundle_name
	}
}

/// Lists the texture properties of `shader` in declaration order, bound or not.
pub fn extract_texture_properties(
	catalog: &dyn AssetCatalog,
	shader: &ShaderAsset,
	importer: &ImporterMetadata,
) -> Vec<TextureProperty> {
	let schema = match catalog.shader_property_schema(shader) {
		Some(schema) => schema,
		None => return Vec::new(),
	};

	schema
		.into_iter()
		.filter_map(|property| {
			let dimension = match property.kind {
				PropertyKind::Texture(dimension) => dimension,
				_ => return None,
			};

			let texture = importer.default_texture(&property.name).cloned();
			let bundle_name = texture
				.as_ref()
				.map(|texture| catalog.bundle_name_for_path(&texture.path))
				.unwrap_or_default();

			Some(TextureProperty {
				property_name: property.name,
				display_name: property.display_label,
				dimension,
				texture,
				bundle_name,
			})
		})
		.collect()
}
