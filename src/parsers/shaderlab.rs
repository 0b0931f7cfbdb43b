//! Parser for the property schema of ShaderLab sources.

use super::{identifier, parenthesized, quoted_string};
use crate::errors::{Error, Result};
use crate::types::{PropertyKind, ShaderProperty, TextureDimension};
use nom::{
	branch::*, bytes::complete::*, character::complete::*, combinator::*, multi::*, sequence::*,
	IResult,
};
use regex::{Captures, Regex};
use std::borrow::Cow;

#[derive(Debug, PartialEq)]
pub struct ShaderSource {
	pub name: String,
	pub properties: Vec<ShaderProperty>,
}

/// Removes comments, keeping line breaks so that positions map to the original lines.
pub fn strip_comments(code: &str) -> Cow<str> {
	lazy_static! {
		static ref COMMENT_RE: Regex = Regex::new(r"(?s)//[^\n]*|/\*.*?\*/").expect("Bad regex.");
	}

	COMMENT_RE.replace_all(code, |captures: &Captures| {
		"\n".repeat(captures[0].matches('\n').count())
	})
}

fn attribute(input: &str) -> IResult<&str, &str> {
	terminated(
		delimited(char('['), take_till(|c: char| c == ']'), char(']')),
		multispace0,
	)(input)
}

fn texture_dimension(input: &str) -> IResult<&str, TextureDimension> {
	alt((
		value(TextureDimension::Tex2DArray, tag_no_case("2DArray")),
		value(TextureDimension::Tex2D, tag_no_case("2D")),
		value(TextureDimension::Tex3D, tag_no_case("3D")),
		value(TextureDimension::CubeArray, tag_no_case("CubeArray")),
		value(TextureDimension::Cube, tag_no_case("Cube")),
		value(TextureDimension::Any, tag_no_case("Any")),
		value(TextureDimension::Tex2D, tag_no_case("Rect")),
	))(input)
}

fn property_kind(input: &str) -> IResult<&str, PropertyKind> {
	alt((
		value(
			PropertyKind::Range,
			tuple((tag_no_case("Range"), multispace0, parenthesized)),
		),
		value(PropertyKind::Float, tag_no_case("Float")),
		value(PropertyKind::Int, tag_no_case("Integer")),
		value(PropertyKind::Int, tag_no_case("Int")),
		value(PropertyKind::Color, tag_no_case("Color")),
		value(PropertyKind::Vector, tag_no_case("Vector")),
		map(texture_dimension, PropertyKind::Texture),
	))(input)
}

fn default_value(input: &str) -> IResult<&str, &str> {
	alt((
		recognize(tuple((
			quoted_string,
			multispace0,
			opt(delimited(char('{'), take_till(|c: char| c == '}'), char('}'))),
		))),
		recognize(parenthesized),
		take_while1(|c: char| c.is_alphanumeric() || c == '.' || c == '-' || c == '+'),
	))(input)
}

fn property(input: &str) -> IResult<&str, ShaderProperty> {
	map(
		tuple((
			many0(attribute),
			identifier,
			multispace0,
			char('('),
			multispace0,
			quoted_string,
			multispace0,
			char(','),
			multispace0,
			property_kind,
			multispace0,
			char(')'),
			multispace0,
			char('='),
			multispace0,
			default_value,
		)),
		|(_, name, _, _, _, display_label, _, _, _, kind, _, _, _, _, _, _)| ShaderProperty {
			name: name.to_string(),
			display_label: display_label.to_string(),
			kind,
		},
	)(input)
}

fn properties_block(input: &str) -> IResult<&str, Vec<ShaderProperty>> {
	map(
		tuple((
			tag_no_case("Properties"),
			multispace0,
			char('{'),
			multispace0,
			many0(terminated(property, multispace0)),
			char('}'),
		)),
		|(_, _, _, _, properties, _)| properties,
	)(input)
}

fn header(input: &str) -> IResult<&str, &str> {
	delimited(
		tuple((multispace0, tag_no_case("Shader"), multispace1)),
		quoted_string,
		tuple((multispace0, char('{'), multispace0)),
	)(input)
}

fn starts_with_keyword(input: &str, keyword: &str) -> bool {
	input
		.get(..keyword.len())
		.map_or(false, |prefix| prefix.eq_ignore_ascii_case(keyword))
}

pub fn shader(input: &str) -> IResult<&str, ShaderSource> {
	let (input, name) = header(input)?;

	// The block is optional but must come first.
	let (input, properties) = if starts_with_keyword(input, "Properties") {
		properties_block(input)?
	} else {
		(input, Vec::new())
	};

	Ok((
		input,
		ShaderSource {
			name: name.to_string(),
			properties,
		},
	))
}

pub fn parse(code: &str) -> Result<ShaderSource> {
	let code = strip_comments(code);
	let code = code.trim_start_matches('\u{feff}');

	let line_of = |rest: &str| code[..code.len() - rest.len()].matches('\n').count() + 1;

	match shader(code) {
		Ok((_, source)) => Ok(source),
		Err(nom::Err::Error((rest, kind))) | Err(nom::Err::Failure((rest, kind))) => Err(
			Error::failed_to_parse(format!("shader ({:?} at line {})", kind, line_of(rest))),
		),
		Err(nom::Err::Incomplete(_)) => Err(Error::failed_to_parse("shader (incomplete input)")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn texture(name: &str, display_label: &str, dimension: TextureDimension) -> ShaderProperty {
		ShaderProperty {
			name: name.to_string(),
			display_label: display_label.to_string(),
			kind: PropertyKind::Texture(dimension),
		}
	}

	fn other(name: &str, display_label: &str, kind: PropertyKind) -> ShaderProperty {
		ShaderProperty {
			name: name.to_string(),
			display_label: display_label.to_string(),
			kind,
		}
	}

	#[test]
	fn test_property() {
		assert_eq!(
			property(r#"[NoScaleOffset] [MainTexture] _MainTex ("Albedo (RGB)", 2D) = "white" {}"#),
			Ok(("", texture("_MainTex", "Albedo (RGB)", TextureDimension::Tex2D)))
		);
		assert_eq!(
			property(r#"_Glossiness("Smoothness",Range(0.0, 1.0))=0.5"#),
			Ok(("", other("_Glossiness", "Smoothness", PropertyKind::Range)))
		);
		assert_eq!(
			property(r#"[Header(Tint)] _Color ("", Color) = (1, 1, 1, 1)"#),
			Ok(("", other("_Color", "", PropertyKind::Color)))
		);
	}

	#[test]
	fn test_property_kind() {
		assert_eq!(property_kind("int"), Ok(("", PropertyKind::Int)));
		assert_eq!(property_kind("Integer"), Ok(("", PropertyKind::Int)));
		assert_eq!(
			property_kind("2DArray"),
			Ok(("", PropertyKind::Texture(TextureDimension::Tex2DArray)))
		);
		assert_eq!(
			property_kind("CUBE"),
			Ok(("", PropertyKind::Texture(TextureDimension::Cube)))
		);
		assert_eq!(
			property_kind("CubeArray"),
			Ok(("", PropertyKind::Texture(TextureDimension::CubeArray)))
		);
		assert_eq!(
			property_kind("Rect"),
			Ok(("", PropertyKind::Texture(TextureDimension::Tex2D)))
		);
		assert!(property_kind("Matrix").is_err());
	}

	#[test]
	fn test_parse() {
		let source = parse(
			r#"// Upgrade NOTE: replaced 'mul(UNITY_MATRIX_MVP,*)'
Shader "Custom/Terrain Blend" {
	Properties {
		_Color ("Color", Color) = (1,1,1,1)
		_MainTex ("Albedo (RGB)", 2D) = "white" {}
		/* _Unused ("Unused", 2D) = "black" {} */
		[Normal] _BumpMap ("Normal Map", 2D) = "bump" {}
		_Glossiness ("Smoothness", Range(0,1)) = 0.5
		[Toggle(_USE_FOG)] _UseFog ("Use fog", Float) = 0
		_Volume ("Volume", 3D) = "" {}
		_Sky ("Sky", Cube) = "" { TexGen CubeReflect }
		_Layers ("Layers", 2DArray) = "" {}
		_Offset ("Offset", Vector) = (0, 0, 0, 0)
		_Anything ("Anything", Any) = "" {}
	}
	SubShader {
		Tags { "RenderType"="Opaque" }
		CGPROGRAM
		#pragma surface surf Standard
		sampler2D _MainTex;
		ENDCG
	}
	FallBack "Diffuse"
}
"#,
		)
		.unwrap();

		assert_eq!(
			source,
			ShaderSource {
				name: "Custom/Terrain Blend".to_string(),
				properties: vec![
					other("_Color", "Color", PropertyKind::Color),
					texture("_MainTex", "Albedo (RGB)", TextureDimension::Tex2D),
					texture("_BumpMap", "Normal Map", TextureDimension::Tex2D),
					other("_Glossiness", "Smoothness", PropertyKind::Range),
					other("_UseFog", "Use fog", PropertyKind::Float),
					texture("_Volume", "Volume", TextureDimension::Tex3D),
					texture("_Sky", "Sky", TextureDimension::Cube),
					texture("_Layers", "Layers", TextureDimension::Tex2DArray),
					other("_Offset", "Offset", PropertyKind::Vector),
					texture("_Anything", "Anything", TextureDimension::Any),
				],
			}
		);
	}

	#[test]
	fn test_parse_without_properties() {
		let source = parse(
			"\u{feff}Shader \"Hidden/Blit\"\n{\n\tSubShader { Pass { } }\n}\n",
		)
		.unwrap();

		assert_eq!(
			source,
			ShaderSource {
				name: "Hidden/Blit".to_string(),
				properties: vec![],
			}
		);
	}

	#[test]
	fn test_parse_error_reports_line() {
		let err = parse(
			r#"Shader "Broken" {
	Properties {
		_MainTex ("Albedo", 2D) = "white" {}
		_Matrix ("Matrix", Matrix) = 0
	}
}
"#,
		)
		.unwrap_err();

		assert_eq!(err.to_string(), "Failed to parse shader (Char at line 4).");
	}

	#[test]
	fn test_strip_comments() {
		assert_eq!(
			strip_comments("a // b\nc /* d\ne */ f"),
			"a \nc \n f".to_string()
		);
	}
}
