//! Zero-allocation evaluation for array-valued curves.
//!
//! The generic [`Curve::evaluate`](crate::curve::Curve::evaluate) path works
//! for [`ArrayValue`] curves but builds its result on the heap. The hot path
//! here writes element-wise into a caller-supplied slice instead, renting any
//! intermediate buffer from a [`ScratchPool`]. Loop resolution is shared with
//! the owned path, so both agree on every edge case.

use crate::curve::{Curve, Resolved, ResolvedKind};
use crate::error::CurveError;
use crate::key::{CurveKey, Keyframe, SmoothKey};
use crate::keys::SegmentHit;
use crate::pool::ScratchPool;
use crate::sampler::{hermite_basis, CurvePosition, Sampler};
use crate::value::{ArrayValue, SampleValue};

/// Slice-level access to array-valued keys; tangentless key shapes report
/// `None` and extend flat.
pub trait ArrayKeyframe: Keyframe<Value = ArrayValue> {
    fn value_slice(&self) -> &[f32];

    #[inline]
    fn tangent_in_slice(&self) -> Option<&[f32]> {
        None
    }

    #[inline]
    fn tangent_out_slice(&self) -> Option<&[f32]> {
        None
    }
}

impl ArrayKeyframe for CurveKey<ArrayValue> {
    #[inline]
    fn value_slice(&self) -> &[f32] {
        self.value.as_slice()
    }
}

impl ArrayKeyframe for SmoothKey<ArrayValue> {
    #[inline]
    fn value_slice(&self) -> &[f32] {
        self.value.as_slice()
    }

    #[inline]
    fn tangent_in_slice(&self) -> Option<&[f32]> {
        Some(self.tangent_in.as_slice())
    }

    #[inline]
    fn tangent_out_slice(&self) -> Option<&[f32]> {
        Some(self.tangent_out.as_slice())
    }
}

impl<K: ArrayKeyframe> Curve<K> {
    /// The per-key element count shared by every key of this curve
    /// (construction enforces uniformity); 0 for an empty curve.
    pub fn element_count(&self) -> usize {
        self.keys().first().map(|k| k.value().element_count()).unwrap_or(0)
    }

    /// Evaluate into `dst` using the process-wide scratch pool.
    pub fn evaluate_into(&self, position: f32, dst: &mut [f32]) -> Result<(), CurveError> {
        self.evaluate_into_with(position, dst, ScratchPool::shared())
    }

    /// Evaluate into `dst`, renting any intermediate buffer from `pool`.
    ///
    /// `dst` must match the curve's element count exactly; a mismatch means a
    /// broken authoring pipeline and fails fast. An empty curve writes zeros
    /// into whatever `dst` was given.
    pub fn evaluate_into_with(
        &self,
        position: f32,
        dst: &mut [f32],
        pool: &ScratchPool,
    ) -> Result<(), CurveError> {
        let resolved = self.resolve(position);
        if resolved.kind == ResolvedKind::Empty {
            dst.fill(0.0);
            return Ok(());
        }
        let expected = self.element_count();
        if dst.len() != expected {
            return Err(CurveError::ShapeMismatch {
                expected,
                found: dst.len(),
            });
        }

        if resolved.cycle != 0.0 {
            // Inner result goes through a pooled temporary so the offset can
            // be applied in one pass over dst.
            let mut scratch = pool.rent(expected);
            self.write_resolved(&resolved, position, &mut scratch);
            let first = self.keys().first().map(ArrayKeyframe::value_slice);
            let last = self.keys().last().map(ArrayKeyframe::value_slice);
            if let (Some(first), Some(last)) = (first, last) {
                for (j, out) in dst.iter_mut().enumerate() {
                    *out = scratch[j] + (last[j] - first[j]) * resolved.cycle;
                }
            }
        } else {
            self.write_resolved(&resolved, position, dst);
        }
        Ok(())
    }

    fn write_resolved(&self, resolved: &Resolved, position: f32, out: &mut [f32]) {
        match resolved.kind {
            ResolvedKind::Empty => out.fill(0.0),
            ResolvedKind::Single => {
                if let Some(k) = self.keys().first() {
                    out.copy_from_slice(k.value_slice());
                }
            }
            ResolvedKind::Hit(SegmentHit::Key(i)) => {
                if let Some(k) = self.keys().get(i) {
                    out.copy_from_slice(k.value_slice());
                }
            }
            ResolvedKind::Hit(SegmentHit::Segment { left, right, t }) => {
                let sampler = self
                    .keys()
                    .sampler_for_segment(left)
                    .unwrap_or(self.default_sampler());
                if let (Some(k1), Some(k2)) = (self.keys().get(left), self.keys().get(right)) {
                    interpolate_slices(sampler, k1, k2, t, out);
                }
            }
            ResolvedKind::Extend(side) => {
                let boundary = match side {
                    CurvePosition::Before => self.keys().first(),
                    _ => self.keys().last(),
                };
                if let Some(key) = boundary {
                    extend_slice(self.default_sampler(), key, position, side, out);
                }
            }
        }
    }
}

fn interpolate_slices<K: ArrayKeyframe>(sampler: Sampler, k1: &K, k2: &K, t: f32, out: &mut [f32]) {
    let a = k1.value_slice();
    let b = k2.value_slice();
    match sampler {
        Sampler::Step => out.copy_from_slice(if t >= 1.0 { b } else { a }),
        Sampler::Linear => {
            for (j, o) in out.iter_mut().enumerate() {
                *o = a[j] + (b[j] - a[j]) * t;
            }
        }
        Sampler::Smooth | Sampler::CubicSpline => {
            let (h00, h10, h01, h11) = hermite_basis(t);
            let t_out = k1.tangent_out_slice();
            let t_in = k2.tangent_in_slice();
            for (j, o) in out.iter_mut().enumerate() {
                let mut v = a[j] * h00 + b[j] * h01;
                if let Some(t_out) = t_out {
                    v += t_out[j] * h10;
                }
                if let Some(t_in) = t_in {
                    v += t_in[j] * h11;
                }
                *o = v;
            }
        }
    }
}

fn extend_slice<K: ArrayKeyframe>(
    sampler: Sampler,
    key: &K,
    position: f32,
    side: CurvePosition,
    out: &mut [f32],
) {
    let value = key.value_slice();
    match sampler {
        Sampler::Step | Sampler::Linear => out.copy_from_slice(value),
        Sampler::Smooth | Sampler::CubicSpline => {
            let run = key.position() - position;
            let tangent = match side {
                CurvePosition::Before => key.tangent_in_slice(),
                _ => key.tangent_out_slice(),
            };
            match tangent {
                Some(tangent) => {
                    for (j, o) in out.iter_mut().enumerate() {
                        *o = value[j] - tangent[j] * run;
                    }
                }
                None => out.copy_from_slice(value),
            }
        }
    }
}
