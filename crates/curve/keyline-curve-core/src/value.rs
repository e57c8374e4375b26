//! Value arithmetic capability layer.
//!
//! Every value type a curve can carry implements [`SampleValue`]: the small
//! `{add, sub, scale}` set that interpolation, extrapolation and cycle-offset
//! math are written against. One generic sampler implementation then serves
//! scalars, fixed-size vectors, quaternions and variable-length arrays alike.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Arithmetic capabilities required of a curve value.
///
/// `Default` doubles as the value returned when evaluating a curve with no
/// keys (identity for quaternions, zero for everything else).
pub trait SampleValue: Clone + PartialEq + Debug + Default {
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn scale(&self, factor: f32) -> Self;

    /// Whether two values may live on the same curve. Fixed-size types are
    /// always compatible; variable-length arrays require equal element counts.
    #[inline]
    fn compatible_with(&self, _other: &Self) -> bool {
        true
    }

    /// Runtime element count for variable-length values; 0 for fixed-size
    /// types, whose shape is carried by the type itself.
    #[inline]
    fn element_count(&self) -> usize {
        0
    }
}

impl SampleValue for f32 {
    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    #[inline]
    fn scale(&self, factor: f32) -> Self {
        self * factor
    }
}

macro_rules! impl_sample_value_array {
    ($n:literal) => {
        impl SampleValue for [f32; $n] {
            #[inline]
            fn add(&self, rhs: &Self) -> Self {
                std::array::from_fn(|i| self[i] + rhs[i])
            }

            #[inline]
            fn sub(&self, rhs: &Self) -> Self {
                std::array::from_fn(|i| self[i] - rhs[i])
            }

            #[inline]
            fn scale(&self, factor: f32) -> Self {
                std::array::from_fn(|i| self[i] * factor)
            }
        }
    };
}

impl_sample_value_array!(2);
impl_sample_value_array!(3);
impl_sample_value_array!(4);

/// Quaternion (x, y, z, w).
///
/// Curve arithmetic on quaternions is component-wise; Hermite/linear blending
/// produces an unnormalized result, and consumers that need a unit rotation
/// call [`Quat::normalized`] on the evaluated value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Quat(pub [f32; 4]);

impl Quat {
    pub const IDENTITY: Quat = Quat([0.0, 0.0, 0.0, 1.0]);

    /// Normalize to unit length; the identity rotation if the length is zero.
    #[inline]
    pub fn normalized(self) -> Quat {
        let q = self.0;
        let len2 = q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3];
        if len2 > 0.0 {
            let inv_len = len2.sqrt().recip();
            Quat([q[0] * inv_len, q[1] * inv_len, q[2] * inv_len, q[3] * inv_len])
        } else {
            Quat::IDENTITY
        }
    }
}

impl Default for Quat {
    #[inline]
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl SampleValue for Quat {
    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        Quat(self.0.add(&rhs.0))
    }

    #[inline]
    fn sub(&self, rhs: &Self) -> Self {
        Quat(self.0.sub(&rhs.0))
    }

    #[inline]
    fn scale(&self, factor: f32) -> Self {
        Quat(self.0.scale(factor))
    }
}

/// Variable-length array of scalars.
///
/// All keys of one curve must agree on the element count; the collection
/// enforces this at construction, so the arithmetic below treats a mismatch
/// as a broken invariant rather than a recoverable error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ArrayValue(pub Vec<f32>);

impl ArrayValue {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for ArrayValue {
    fn from(v: Vec<f32>) -> Self {
        ArrayValue(v)
    }
}

impl SampleValue for ArrayValue {
    fn add(&self, rhs: &Self) -> Self {
        assert_eq!(self.0.len(), rhs.0.len(), "array value element count mismatch");
        ArrayValue(self.0.iter().zip(&rhs.0).map(|(a, b)| a + b).collect())
    }

    fn sub(&self, rhs: &Self) -> Self {
        assert_eq!(self.0.len(), rhs.0.len(), "array value element count mismatch");
        ArrayValue(self.0.iter().zip(&rhs.0).map(|(a, b)| a - b).collect())
    }

    fn scale(&self, factor: f32) -> Self {
        ArrayValue(self.0.iter().map(|a| a * factor).collect())
    }

    #[inline]
    fn compatible_with(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
    }

    #[inline]
    fn element_count(&self) -> usize {
        self.0.len()
    }
}
