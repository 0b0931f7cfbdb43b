use crate::types::{AssetId, AssetKind, ImporterMetadata, ShaderAsset, ShaderProperty};

/// Read-only view of a project's assets.
///
/// Asset paths are project-relative and use `/` as separator.
pub trait AssetCatalog {
	fn find_assets_of_kind(&self, kind: AssetKind) -> Vec<AssetId>;

	fn resolve_asset_path(&self, id: &AssetId) -> Option<String>;

	/// Returns `None` when the asset at `path` is not an importable shader.
	fn importer_metadata(&self, path: &str) -> Option<ImporterMetadata>;

	/// Bundle the asset at `path` ends up in, empty if unassigned.
	fn bundle_name_for_path(&self, path: &str) -> String;

	/// Declared properties in declaration order, `None` if the shader cannot be read.
	fn shader_property_schema(&self, shader: &ShaderAsset) -> Option<Vec<ShaderProperty>>;
}
