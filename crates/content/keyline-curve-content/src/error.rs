//! Errors surfaced at the content-processing boundary.

use keyline_curve_core::CurveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("xml parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("asset type must be '{expected}', found '{found}'")]
    WrongAssetType { expected: &'static str, found: String },

    #[error("missing element <{0}>")]
    MissingElement(&'static str),

    #[error("key list holds {0} values, which is not a multiple of 5")]
    BadKeyTuple(usize),

    #[error("invalid numeric literal '{0}'")]
    BadNumber(String),

    #[error("unknown continuity '{0}'")]
    UnknownContinuity(String),

    #[error("unknown loop type '{0}'")]
    UnknownLoopType(String),

    #[error("invalid loop type code {0}")]
    BadLoopCode(i32),

    #[error("invalid continuity code {0}")]
    BadContinuityCode(i32),

    #[error("invalid key count {0}")]
    BadKeyCount(i32),

    #[error(transparent)]
    Curve(#[from] CurveError),
}
