use crate::catalog::AssetCatalog;
use crate::detector::{self, ShaderReport};
use crate::types::{AssetKind, ShaderAsset};
use log::{debug, info};
use serde::Serialize;
use std::slice;

/// Outcome of one scan, in catalog enumeration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportSet {
	reports: Vec<ShaderReport>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
	pub shaders: usize,
	pub mismatched_shaders: usize,
	pub mismatched_textures: usize,
}

impl ReportSet {
	pub fn iter(&self) -> slice::Iter<ShaderReport> {
		self.reports.iter()
	}

	pub fn len(&self) -> usize {
		self.reports.len()
	}

	pub fn is_empty(&self) -> bool {
		self.reports.is_empty()
	}

	pub fn mismatched(&self) -> impl Iterator<Item = &ShaderReport> {
		self.reports.iter().filter(|report| report.has_mismatch())
	}

	pub fn summary(&self) -> Summary {
		let mut summary = Summary {
			shaders: self.reports.len(),
			..Default::default()
		};
		for report in self.mismatched() {
			summary.mismatched_shaders += 1;
			summary.mismatched_textures += report.mismatched_properties().count();
		}
		summary
	}
}

impl<'a> IntoIterator for &'a ReportSet {
	type Item = &'a ShaderReport;
	type IntoIter = slice::Iter<'a, ShaderReport>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Builds a fresh report for every shader of `catalog` that has default textures.
///
/// Shaders whose path or importer cannot be resolved are skipped.
pub fn scan_all(catalog: &dyn AssetCatalog) -> ReportSet {
	let ids = catalog.find_assets_of_kind(AssetKind::Shader);
	info!("Found shaders: {}.", ids.len());

	let mut reports = Vec::new();
	for id in ids {
		let path = match catalog.resolve_asset_path(&id) {
			Some(path) => path,
			None => {
				debug!("Skipping shader {}: unknown asset.", id);
				continue;
			}
		};

		let importer = match catalog.importer_metadata(&path) {
			Some(importer) => importer,
			None => {
				debug!("Skipping '{}': not an importable shader.", path);
				continue;
			}
		};

		let shader = ShaderAsset { id, path };
		if let Some(report) = detector::build_report(catalog, &shader, &importer) {
			reports.push(report);
		}
	}

	info!("Shaders with default textures: {}.", reports.len());
	ReportSet { reports }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_catalog::{texture_property, MemoryCatalog};
	use pretty_assertions::assert_eq;

	fn shader_paths(report_set: &ReportSet) -> Vec<&str> {
		report_set
			.iter()
			.map(|report| report.shader.path.as_str())
			.collect()
	}

	fn sample_catalog() -> MemoryCatalog {
		let mut catalog = MemoryCatalog::default();
		let t1 = catalog.add_texture("t1", "Assets/T1.png", "bundleA");
		let t2 = catalog.add_texture("t2", "Assets/T2.png", "bundleB");
		let t3 = catalog.add_texture("t3", "Assets/T3.png", "");
		catalog.add_shader(
			"s",
			"Assets/S.shader",
			"bundleA",
			vec![
				texture_property("Albedo", ""),
				texture_property("Normal", ""),
			],
			vec![("Albedo", t1), ("Normal", t2)],
		);
		catalog.add_shader(
			"s2",
			"Assets/S2.shader",
			"",
			vec![texture_property("Albedo", "")],
			vec![("Albedo", t3)],
		);
		catalog.add_shader(
			"s3",
			"Assets/S3.shader",
			"bundleA",
			vec![
				texture_property("_MainTex", ""),
				texture_property("_BumpMap", ""),
				texture_property("_Occlusion", ""),
			],
			vec![],
		);
		catalog
	}

	#[test]
	fn test_scan_all() {
		let report_set = scan_all(&sample_catalog());

		assert_eq!(
			shader_paths(&report_set),
			vec!["Assets/S.shader", "Assets/S2.shader"]
		);
		assert_eq!(
			report_set
				.iter()
				.map(|report| report.has_mismatch())
				.collect::<Vec<_>>(),
			vec![true, false]
		);
	}

	#[test]
	fn test_scan_all_is_idempotent() {
		let catalog = sample_catalog();
		assert_eq!(scan_all(&catalog), scan_all(&catalog));
	}

	#[test]
	fn test_unresolvable_assets_are_skipped() {
		let mut catalog = MemoryCatalog::default();
		let texture = catalog.add_texture("t", "Assets/T.png", "env");
		catalog.add_dangling_id("missing");
		catalog.add_foreign_asset("graph", "Assets/Water.shadergraph");
		catalog.add_shader(
			"s",
			"Assets/S.shader",
			"env",
			vec![texture_property("_MainTex", "")],
			vec![("_MainTex", texture)],
		);

		let report_set = scan_all(&catalog);

		assert_eq!(shader_paths(&report_set), vec!["Assets/S.shader"]);
	}

	#[test]
	fn test_empty_catalog() {
		let report_set = scan_all(&MemoryCatalog::default());
		assert!(report_set.is_empty());
		assert_eq!(report_set.summary(), Summary::default());
	}

	#[test]
	fn test_mismatched_view_and_summary() {
		let report_set = scan_all(&sample_catalog());

		let mismatched: Vec<_> = report_set
			.mismatched()
			.map(|report| report.shader.path.as_str())
			.collect();
		assert_eq!(mismatched, vec!["Assets/S.shader"]);
		assert_eq!(report_set.len(), 2);
		assert_eq!(
			report_set.summary(),
			Summary {
				shaders: 2,
				mismatched_shaders: 1,
				mismatched_textures: 1,
			}
		);
	}
}
