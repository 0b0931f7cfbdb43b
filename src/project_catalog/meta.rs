use crate::errors::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
	guid: Option<String>,
	folder_asset: Option<Value>,
	#[serde(flatten)]
	sections: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImporterSection {
	asset_bundle_name: Option<String>,
	default_textures: Option<Vec<BTreeMap<String, ObjectReference>>>,
}

#[derive(Debug, Deserialize)]
struct ObjectReference {
	guid: Option<String>,
}

/// Contents of an asset's `.meta` file relevant to bundling.
#[derive(Debug, Default, PartialEq)]
pub struct MetaFile {
	pub guid: String,
	pub folder: bool,
	pub importer: Option<String>,
	pub bundle_name: String,
	/// Property name and referenced GUID, in file order.
	pub default_textures: Vec<(String, Option<String>)>,
}

lazy_static! {
	static ref GUID_SCALAR: Regex =
		Regex::new(r##"(?m)(^[ \t]*|[{,][ \t]*)guid:[ \t]*([^\s,{}\[\]'"#]+)"##)
			.expect("Bad regex.");
	static ref BUNDLE_NAME_SCALAR: Regex =
		Regex::new(r##"(?m)^([ \t]*assetBundleName:[ \t]*)([^\s'"#][^\r\n'"#]*?)[ \t]*$"##)
			.expect("Bad regex.");
}

/// Quotes GUIDs and bundle names so that YAML never reads them as numbers or booleans.
fn quote_identifiers(contents: &str) -> String {
	let contents = GUID_SCALAR.replace_all(contents, r#"${1}guid: "${2}""#);
	BUNDLE_NAME_SCALAR
		.replace_all(&contents, "${1}'${2}'")
		.into_owned()
}

fn is_null_guid(guid: &str) -> bool {
	guid.chars().all(|c| c == '0')
}

pub fn parse(path: &Path, contents: &str) -> Result<MetaFile> {
	let document: Document = serde_yaml::from_str(&quote_identifiers(contents))
		.map_err(|err| Error::failed_to_deserialize(path, err))?;

	let guid = document
		.guid
		.filter(|guid| !guid.is_empty())
		.ok_or_else(|| Error::message(format!("'{}' has no guid.", path.to_string_lossy())))?;

	let folder = match &document.folder_asset {
		Some(Value::Bool(flag)) => *flag,
		Some(Value::String(text)) => text == "yes",
		_ => false,
	};

	let mut meta = MetaFile {
		guid,
		folder,
		..Default::default()
	};

	let importer = document
		.sections
		.into_iter()
		.find(|(key, section)| key.ends_with("Importer") && section.is_mapping());

	if let Some((name, section)) = importer {
		let section: ImporterSection = serde_yaml::from_value(section)
			.map_err(|err| Error::failed_to_deserialize(path, err))?;

		meta.importer = Some(name);
		meta.bundle_name = section.asset_bundle_name.unwrap_or_default();
		meta.default_textures = section
			.default_textures
			.unwrap_or_default()
			.into_iter()
			.flat_map(|entry| entry.into_iter())
			.map(|(property, reference)| {
				let guid = reference.guid.filter(|guid| !is_null_guid(guid));
				(property, guid)
			})
			.collect();
	}

	Ok(meta)
}
