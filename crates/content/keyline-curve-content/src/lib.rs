//! Keyline curve content pipeline
//!
//! Import/export for curve assets at the content-processing boundary: the
//! authored XML schema, the preprocessed little-endian binary cache, and the
//! build step that assembles an evaluatable curve with per-segment sampler
//! overrides. The engine crate itself never parses text; everything
//! format-shaped lives here.

pub mod binary;
pub mod definition;
pub mod error;
pub mod xml;

pub use binary::{read_curve_binary, write_curve_binary};
pub use definition::{CurveDefinition, CurveKeyDef};
pub use error::ContentError;
pub use xml::{read_curve_xml, write_curve_xml, CURVE_ASSET_TYPE};
