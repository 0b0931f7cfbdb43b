use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Identifier of an asset, stable across renames and moves.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AssetId(pub String);

impl fmt::Display for AssetId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssetKind {
	Shader,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShaderAsset {
	pub id: AssetId,
	pub path: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextureRef {
	pub id: AssetId,
	pub path: String,
	pub name: String,
}

impl TextureRef {
	pub fn new(id: AssetId, path: impl Into<String>) -> Self {
		let path = path.into();
		let name = Path::new(&path)
			.file_stem()
			.and_then(|stem| stem.to_str())
			.unwrap_or(&path)
			.to_string();
		TextureRef { id, path, name }
	}
}

/// Import settings of a shader asset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImporterMetadata {
	/// Bundle explicitly assigned to the shader, empty if none.
	pub bundle_name: String,
	pub default_textures: BTreeMap<String, TextureRef>,
}

impl ImporterMetadata {
	pub fn default_texture(&self, property_name: &str) -> Option<&TextureRef> {
		self.default_textures.get(property_name)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextureDimension {
	Any,
	Cube,
	CubeArray,
	Tex2D,
	Tex2DArray,
	Tex3D,
}

impl fmt::Display for TextureDimension {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			TextureDimension::Any => "Any",
			TextureDimension::Cube => "Cube",
			TextureDimension::CubeArray => "CubeArray",
			TextureDimension::Tex2D => "2D",
			TextureDimension::Tex2DArray => "2DArray",
			TextureDimension::Tex3D => "3D",
		};
		write!(f, "{}", name)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropertyKind {
	Color,
	Float,
	Int,
	Range,
	Texture(TextureDimension),
	Vector,
}

/// One entry of a shader's declared property schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShaderProperty {
	pub name: String,
	pub display_label: String,
	pub kind: PropertyKind,
}
