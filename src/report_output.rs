use crate::aggregator::{ReportSet, Summary};
use crate::detector::{self, ShaderReport};
use crate::errors::{Error, Result};
use serde::Serialize;
use std::str::FromStr;
use tera::{Context, Tera};

const REPORT_TEMPLATE_NAME: &str = "report.txt";
const REPORT_TEMPLATE: &str = include_str!("templates/report.txt.tera");

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
	Json,
	Text,
	Yaml,
}

impl Default for OutputFormat {
	fn default() -> Self {
		OutputFormat::Text
	}
}

impl FromStr for OutputFormat {
	type Err = String;

	fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
		match text {
			"json" => Ok(OutputFormat::Json),
			"text" => Ok(OutputFormat::Text),
			"yaml" => Ok(OutputFormat::Yaml),
			_ => Err(format!("Unknown format '{}', expected text, json or yaml.", text)),
		}
	}
}

#[derive(Debug, Serialize)]
struct TexturePropertyView<'a> {
	property_name: &'a str,
	display_name: &'a str,
	dimension: String,
	texture_id: &'a str,
	texture_path: &'a str,
	texture_name: &'a str,
	bundle_name: &'a str,
	mismatched: bool,
}

#[derive(Debug, Serialize)]
struct ShaderReportView<'a> {
	shader_id: &'a str,
	shader_path: &'a str,
	bundle_name: &'a str,
	mismatched: bool,
	properties: Vec<TexturePropertyView<'a>>,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
	only_mismatched: bool,
	shaders: Vec<ShaderReportView<'a>>,
	summary: Summary,
}

fn shader_view(report: &ShaderReport) -> ShaderReportView {
	let properties = report
		.properties()
		.iter()
		.filter_map(|property| {
			let texture = property.texture()?;
			Some(TexturePropertyView {
				property_name: &property.property_name,
				display_name: &property.display_name,
				dimension: property.dimension.to_string(),
				texture_id: &texture.id.0,
				texture_path: &texture.path,
				texture_name: &texture.name,
				bundle_name: property.bundle_name(),
				mismatched: detector::bundles_differ(&report.bundle_name, property.bundle_name()),
			})
		})
		.collect();

	ShaderReportView {
		shader_id: &report.shader.id.0,
		shader_path: &report.shader.path,
		bundle_name: &report.bundle_name,
		mismatched: report.has_mismatch(),
		properties,
	}
}

/// The filter only affects what is shown; the summary always covers the whole set.
fn report_view(report_set: &ReportSet, only_mismatched: bool) -> ReportView {
	let shaders = report_set
		.into_iter()
		.filter(|report| !only_mismatched || report.has_mismatch())
		.map(shader_view)
		.collect();

	ReportView {
		only_mismatched,
		shaders,
		summary: report_set.summary(),
	}
}

pub fn render(report_set: &ReportSet, format: OutputFormat, only_mismatched: bool) -> Result<String> {
	let view = report_view(report_set, only_mismatched);

	match format {
		OutputFormat::Json => {
			serde_json::to_string_pretty(&view).map_err(|err| Error::failed_to_serialize("JSON", err))
		}

		OutputFormat::Text => {
			let mut tera = Tera::default();
			tera.add_raw_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)
				.map_err(|err| Error::failed_to_render_template(REPORT_TEMPLATE_NAME, err))?;

			let context = Context::from_serialize(&view)
				.map_err(|err| Error::failed_to_render_template(REPORT_TEMPLATE_NAME, err))?;

			tera.render(REPORT_TEMPLATE_NAME, &context)
				.map_err(|err| Error::failed_to_render_template(REPORT_TEMPLATE_NAME, err))
		}

		OutputFormat::Yaml => {
			serde_yaml::to_string(&view).map_err(|err| Error::failed_to_serialize("YAML", err))
		}
	}
}
