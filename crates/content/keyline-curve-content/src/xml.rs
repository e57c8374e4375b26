//! XML curve-definition schema.
//!
//! The authored document carries an `<Asset Type="Framework:Curve">` element
//! with `PreLoop`/`PostLoop` enum-name children and a `<Keys>` element whose
//! text is a whitespace-separated flat list of
//! `(position, value, tangentIn, tangentOut, continuity)` 5-tuples.

use std::fmt::Write as _;

use roxmltree::{Document, Node};

use crate::definition::{
    continuity_from_name, continuity_name, loop_type_from_name, loop_type_name, CurveDefinition,
    CurveKeyDef,
};
use crate::error::ContentError;

/// The asset type tag this reader accepts.
pub const CURVE_ASSET_TYPE: &str = "Framework:Curve";

const KEY_TUPLE_ARITY: usize = 5;

fn child_text<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> Result<&'a str, ContentError> {
    parent
        .children()
        .find(|n| n.has_tag_name(name))
        .and_then(|n| n.text())
        .ok_or(ContentError::MissingElement(name))
}

fn parse_f32(token: &str) -> Result<f32, ContentError> {
    token
        .parse::<f32>()
        .map_err(|_| ContentError::BadNumber(token.to_string()))
}

/// Read a curve definition from XML source text.
pub fn read_curve_xml(source: &str) -> Result<CurveDefinition, ContentError> {
    let doc = Document::parse(source)?;
    let asset = doc
        .descendants()
        .find(|n| n.has_tag_name("Asset"))
        .ok_or(ContentError::MissingElement("Asset"))?;
    let asset_type = asset.attribute("Type").unwrap_or_default();
    if asset_type != CURVE_ASSET_TYPE {
        return Err(ContentError::WrongAssetType {
            expected: CURVE_ASSET_TYPE,
            found: asset_type.to_string(),
        });
    }

    let pre_loop = loop_type_from_name(child_text(asset, "PreLoop")?.trim())?;
    let post_loop = loop_type_from_name(child_text(asset, "PostLoop")?.trim())?;

    let tokens: Vec<&str> = child_text(asset, "Keys")?.split_whitespace().collect();
    if tokens.len() % KEY_TUPLE_ARITY != 0 {
        return Err(ContentError::BadKeyTuple(tokens.len()));
    }
    let mut keys = Vec::with_capacity(tokens.len() / KEY_TUPLE_ARITY);
    for tuple in tokens.chunks_exact(KEY_TUPLE_ARITY) {
        keys.push(CurveKeyDef {
            position: parse_f32(tuple[0])?,
            value: parse_f32(tuple[1])?,
            tangent_in: parse_f32(tuple[2])?,
            tangent_out: parse_f32(tuple[3])?,
            continuity: continuity_from_name(tuple[4])?,
        });
    }

    let def = CurveDefinition {
        pre_loop,
        post_loop,
        keys,
    };
    log::debug!(
        "parsed curve asset: {} keys, pre={:?}, post={:?}",
        def.keys.len(),
        def.pre_loop,
        def.post_loop
    );
    Ok(def)
}

/// Write a curve definition back out in the authored XML shape.
pub fn write_curve_xml(def: &CurveDefinition) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<XnaContent>\n");
    let _ = writeln!(out, "  <Asset Type=\"{}\">", CURVE_ASSET_TYPE);
    let _ = writeln!(out, "    <PreLoop>{}</PreLoop>", loop_type_name(def.pre_loop));
    let _ = writeln!(out, "    <PostLoop>{}</PostLoop>", loop_type_name(def.post_loop));
    out.push_str("    <Keys>");
    for key in &def.keys {
        let _ = write!(
            out,
            "\n      {} {} {} {} {}",
            key.position,
            key.value,
            key.tangent_in,
            key.tangent_out,
            continuity_name(key.continuity)
        );
    }
    out.push_str("\n    </Keys>\n  </Asset>\n</XnaContent>\n");
    out
}
