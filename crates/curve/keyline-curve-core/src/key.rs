//! Keyframe types.
//!
//! Two concrete key shapes exist: [`CurveKey`] (position/value plus an
//! authoring continuity hint) and [`SmoothKey`] (position/value plus explicit
//! in/out tangents for Hermite-style sampling). Both are immutable plain data
//! owned by the collection that holds them. The [`Keyframe`] trait is the seam
//! the samplers and the curve container are written against.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::SampleValue;

/// Authoring hint describing how a key transitions to the next one.
///
/// Consumed by content processing to pick per-segment sampler overrides; the
/// evaluator itself never reads it. Discriminants are the codes used by the
/// preprocessed binary format (`Smooth`/`Step` keep the original two-value
/// codes, `Linear` takes the next free one).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Continuity {
    Smooth = 0,
    Step = 1,
    Linear = 2,
}

/// Access shared by all key shapes.
///
/// The tangent accessors default to the zero of the key's own value, so
/// tangentless keys extend flat under tangent-based extrapolation.
pub trait Keyframe: Clone {
    type Value: SampleValue;

    fn position(&self) -> f32;
    fn value(&self) -> &Self::Value;

    #[inline]
    fn tangent_in(&self) -> Self::Value {
        self.value().scale(0.0)
    }

    #[inline]
    fn tangent_out(&self) -> Self::Value {
        self.value().scale(0.0)
    }
}

/// A position/value key without tangents.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveKey<V> {
    pub position: f32,
    pub value: V,
    #[serde(default = "default_continuity")]
    pub continuity: Continuity,
}

fn default_continuity() -> Continuity {
    Continuity::Smooth
}

impl<V> CurveKey<V> {
    pub fn new(position: f32, value: V) -> Self {
        Self {
            position,
            value,
            continuity: Continuity::Smooth,
        }
    }

    pub fn with_continuity(position: f32, value: V, continuity: Continuity) -> Self {
        Self {
            position,
            value,
            continuity,
        }
    }
}

impl<V: SampleValue> Keyframe for CurveKey<V> {
    type Value = V;

    #[inline]
    fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    fn value(&self) -> &V {
        &self.value
    }
}

/// A key carrying explicit in/out tangents (value-delta units per segment).
///
/// Serves both smooth keys (tangents derived by content processing) and
/// cubic-spline keys (tangents authored directly); the engine does not care
/// where the tangents came from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SmoothKey<V> {
    pub position: f32,
    pub value: V,
    pub tangent_in: V,
    pub tangent_out: V,
}

impl<V> SmoothKey<V> {
    pub fn new(position: f32, value: V, tangent_in: V, tangent_out: V) -> Self {
        Self {
            position,
            value,
            tangent_in,
            tangent_out,
        }
    }
}

impl<V: SampleValue> SmoothKey<V> {
    /// A key with flat (zero) tangents.
    pub fn flat(position: f32, value: V) -> Self {
        let zero = value.scale(0.0);
        Self {
            position,
            value,
            tangent_in: zero.clone(),
            tangent_out: zero,
        }
    }
}

impl<V: SampleValue> Keyframe for SmoothKey<V> {
    type Value = V;

    #[inline]
    fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    fn tangent_in(&self) -> V {
        self.tangent_in.clone()
    }

    #[inline]
    fn tangent_out(&self) -> V {
        self.tangent_out.clone()
    }
}

// Keys order by position alone; equal positions compare equal regardless of
// value, matching the collection's sort and duplicate tie-break rules.
impl<V: PartialEq> PartialOrd for CurveKey<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.position.partial_cmp(&other.position)
    }
}

impl<V: PartialEq> PartialOrd for SmoothKey<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.position.partial_cmp(&other.position)
    }
}
