//! Interpolation/extrapolation strategies.
//!
//! [`Sampler`] is a set of stateless strategies written once against the
//! [`SampleValue`](crate::value::SampleValue) capability set, so every value
//! category (scalars, vectors, quaternions, arrays) shares one implementation
//! of the math. Being `Copy` and stateless, the same sampler tag safely
//! serves any number of concurrently evaluated curves.

use serde::{Deserialize, Serialize};

use crate::key::Keyframe;
use crate::value::SampleValue;

/// Where a query position sits relative to the key range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurvePosition {
    Before,
    Within,
    After,
}

/// Interpolation strategy for one curve segment.
///
/// `Smooth` and `CubicSpline` share the Hermite math; they are distinct tags
/// because authored content distinguishes derived tangents from explicitly
/// supplied ones.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sampler {
    Step,
    Linear,
    #[default]
    Smooth,
    CubicSpline,
}

/// Hermite basis functions evaluated at `t`.
#[inline]
pub(crate) fn hermite_basis(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    (
        2.0 * t3 - 3.0 * t2 + 1.0, // h00
        t3 - 2.0 * t2 + t,         // h10
        -2.0 * t3 + 3.0 * t2,      // h01
        t3 - t2,                   // h11
    )
}

impl Sampler {
    /// Interpolate the open segment `[key1, key2]` at factor `t` in `[0, 1]`,
    /// then add `offset` (the accumulated cycle-offset contribution).
    pub fn interpolate_keyframes<K: Keyframe>(
        self,
        key1: &K,
        key2: &K,
        t: f32,
        offset: Option<&K::Value>,
    ) -> K::Value {
        let out = match self {
            Sampler::Step => {
                if t >= 1.0 {
                    key2.value().clone()
                } else {
                    key1.value().clone()
                }
            }
            Sampler::Linear => {
                let delta = key2.value().sub(key1.value());
                key1.value().add(&delta.scale(t))
            }
            Sampler::Smooth | Sampler::CubicSpline => {
                let (h00, h10, h01, h11) = hermite_basis(t);
                key1.value()
                    .scale(h00)
                    .add(&key1.tangent_out().scale(h10))
                    .add(&key2.value().scale(h01))
                    .add(&key2.tangent_in().scale(h11))
            }
        };
        match offset {
            Some(o) => out.add(o),
            None => out,
        }
    }

    /// Project a value outside the key range off the boundary key.
    ///
    /// Step and Linear hold the boundary value (flat extension); the Hermite
    /// variants project along the side-appropriate tangent, so tangentless
    /// keys still extend flat through the zero-tangent default.
    pub fn linear_extension<K: Keyframe>(
        self,
        key: &K,
        position: f32,
        position_type: CurvePosition,
    ) -> K::Value {
        match self {
            Sampler::Step | Sampler::Linear => key.value().clone(),
            Sampler::Smooth | Sampler::CubicSpline => {
                let run = key.position() - position;
                let tangent = match position_type {
                    CurvePosition::Before => key.tangent_in(),
                    _ => key.tangent_out(),
                };
                key.value().sub(&tangent.scale(run))
            }
        }
    }

    /// Offset contributed by `cycle` whole loop repetitions under
    /// cycle-offset looping: `(last - first) * cycle` for every strategy.
    #[inline]
    pub fn cycle_offset<V: SampleValue>(self, first: &V, last: &V, cycle: f32) -> V {
        last.sub(first).scale(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{CurveKey, SmoothKey};

    #[test]
    fn hermite_basis_endpoints() {
        assert_eq!(hermite_basis(0.0), (1.0, 0.0, 0.0, 0.0));
        assert_eq!(hermite_basis(1.0), (0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn step_holds_left_until_segment_end() {
        let a = CurveKey::new(0.0, 1.0f32);
        let b = CurveKey::new(1.0, 2.0f32);
        assert_eq!(Sampler::Step.interpolate_keyframes(&a, &b, 0.999, None), 1.0);
        assert_eq!(Sampler::Step.interpolate_keyframes(&a, &b, 1.0, None), 2.0);
    }

    #[test]
    fn linear_midpoint() {
        let a = CurveKey::new(0.0, 0.0f32);
        let b = CurveKey::new(1.0, 10.0f32);
        assert_eq!(Sampler::Linear.interpolate_keyframes(&a, &b, 0.5, None), 5.0);
    }

    #[test]
    fn smooth_endpoints_ignore_tangents() {
        let a = SmoothKey::new(0.0, 1.0f32, 7.0, -3.0);
        let b = SmoothKey::new(1.0, 4.0f32, 2.0, 9.0);
        assert_eq!(Sampler::Smooth.interpolate_keyframes(&a, &b, 0.0, None), 1.0);
        assert_eq!(Sampler::Smooth.interpolate_keyframes(&a, &b, 1.0, None), 4.0);
    }

    #[test]
    fn offset_is_added_to_the_result() {
        let a = CurveKey::new(0.0, 0.0f32);
        let b = CurveKey::new(1.0, 10.0f32);
        let v = Sampler::Linear.interpolate_keyframes(&a, &b, 0.5, Some(&100.0));
        assert_eq!(v, 105.0);
    }

    #[test]
    fn hermite_extension_projects_along_tangent() {
        let k = SmoothKey::new(1.0, 2.0f32, 0.5, 3.0);
        // Before the curve: value - tangent_in * (pos - query).
        let v = Sampler::Smooth.linear_extension(&k, 0.0, CurvePosition::Before);
        assert_eq!(v, 2.0 - 0.5);
        // After the curve: value - tangent_out * (pos - query).
        let v = Sampler::Smooth.linear_extension(&k, 2.0, CurvePosition::After);
        assert_eq!(v, 2.0 + 3.0);
    }
}
