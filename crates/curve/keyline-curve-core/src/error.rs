//! Error type for curve construction and array-valued evaluation.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    /// Two values on one curve (or a destination buffer) disagree on element
    /// count. Indicates an invalid curve was authored; never recoverable.
    #[error("element count mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// A sampler override referenced an index outside the key sequence.
    #[error("key index {index} out of range for {len} keys")]
    KeyIndexOutOfRange { index: usize, len: usize },

    /// A key position was NaN or infinite.
    #[error("key position must be finite, got {0}")]
    NonFinitePosition(f32),
}
