//! The curve container and its loop resolver.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::key::Keyframe;
use crate::keys::{CurveKeys, SegmentHit};
use crate::sampler::{CurvePosition, Sampler};
use crate::value::SampleValue;

/// Behavior for positions outside the key range. Discriminants are the codes
/// used by the preprocessed binary format.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoopType {
    #[default]
    Constant = 0,
    Cycle = 1,
    CycleOffset = 2,
    Oscillate = 3,
    Linear = 4,
}

/// Where an evaluation lands after loop resolution.
///
/// Both the owned-value path and the array write-into path consume this, so
/// the cycle arithmetic exists exactly once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Resolved {
    pub kind: ResolvedKind,
    /// Whole loop cycles elapsed; nonzero only under `CycleOffset` looping.
    pub cycle: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ResolvedKind {
    Empty,
    Single,
    Hit(SegmentHit),
    Extend(CurvePosition),
}

/// A keyframe curve: ordered keys, a default sampler, and pre/post loop
/// behavior. Immutable once assembled (sampler overrides are applied during
/// assembly through [`Curve::keys_mut`]), and safe to evaluate concurrently.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Curve<K> {
    keys: CurveKeys<K>,
    default_sampler: Sampler,
    pre_loop: LoopType,
    post_loop: LoopType,
}

impl<K: Keyframe> Curve<K> {
    pub fn new(
        keys: CurveKeys<K>,
        default_sampler: Sampler,
        pre_loop: LoopType,
        post_loop: LoopType,
    ) -> Self {
        Self {
            keys,
            default_sampler,
            pre_loop,
            post_loop,
        }
    }

    /// Build a curve directly from unsorted keys.
    pub fn from_keys(
        keys: Vec<K>,
        default_sampler: Sampler,
        pre_loop: LoopType,
        post_loop: LoopType,
    ) -> Result<Self, CurveError> {
        Ok(Self::new(CurveKeys::new(keys)?, default_sampler, pre_loop, post_loop))
    }

    #[inline]
    pub fn keys(&self) -> &CurveKeys<K> {
        &self.keys
    }

    /// Mutable access for assembly-time sampler overrides. The key sequence
    /// itself stays immutable.
    #[inline]
    pub fn keys_mut(&mut self) -> &mut CurveKeys<K> {
        &mut self.keys
    }

    #[inline]
    pub fn default_sampler(&self) -> Sampler {
        self.default_sampler
    }

    #[inline]
    pub fn pre_loop(&self) -> LoopType {
        self.pre_loop
    }

    #[inline]
    pub fn post_loop(&self) -> LoopType {
        self.post_loop
    }

    /// Classify a query position against the key range.
    ///
    /// Meaningful only for non-empty curves; an empty curve reports `Within`.
    pub fn classify(&self, position: f32) -> CurvePosition {
        match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => {
                if position < first.position() {
                    CurvePosition::Before
                } else if position > last.position() {
                    CurvePosition::After
                } else {
                    CurvePosition::Within
                }
            }
            _ => CurvePosition::Within,
        }
    }

    /// Sample the curve at `position`.
    ///
    /// Total by construction: an empty curve yields the value type's default
    /// (identity for quaternions, zero otherwise) and a single-key curve
    /// yields that key's value unconditionally. A position that exactly hits
    /// a key returns the stored value bit-for-bit.
    pub fn evaluate(&self, position: f32) -> K::Value {
        let resolved = self.resolve(position);
        let offset = if resolved.cycle != 0.0 {
            // First/last keys exist whenever a cycle was computed.
            let first = self.keys.first().map(Keyframe::value);
            let last = self.keys.last().map(Keyframe::value);
            match (first, last) {
                (Some(first), Some(last)) => {
                    Some(self.default_sampler.cycle_offset(first, last, resolved.cycle))
                }
                _ => None,
            }
        } else {
            None
        };

        match resolved.kind {
            ResolvedKind::Empty => K::Value::default(),
            ResolvedKind::Single => self.keys.first().map(|k| k.value().clone()).unwrap_or_default(),
            ResolvedKind::Hit(SegmentHit::Key(i)) => {
                let value = self.keys.get(i).map(|k| k.value().clone()).unwrap_or_default();
                match offset {
                    Some(o) => value.add(&o),
                    None => value,
                }
            }
            ResolvedKind::Hit(SegmentHit::Segment { left, right, t }) => {
                let sampler = self
                    .keys
                    .sampler_for_segment(left)
                    .unwrap_or(self.default_sampler);
                match (self.keys.get(left), self.keys.get(right)) {
                    (Some(k1), Some(k2)) => {
                        sampler.interpolate_keyframes(k1, k2, t, offset.as_ref())
                    }
                    _ => K::Value::default(),
                }
            }
            ResolvedKind::Extend(side) => {
                let boundary = match side {
                    CurvePosition::Before => self.keys.first(),
                    _ => self.keys.last(),
                };
                match boundary {
                    Some(key) => self.default_sampler.linear_extension(key, position, side),
                    None => K::Value::default(),
                }
            }
        }
    }

    /// Classify, loop-remap and locate `position`.
    pub(crate) fn resolve(&self, position: f32) -> Resolved {
        let n = self.keys.len();
        if n == 0 {
            return Resolved {
                kind: ResolvedKind::Empty,
                cycle: 0.0,
            };
        }
        if n == 1 {
            return Resolved {
                kind: ResolvedKind::Single,
                cycle: 0.0,
            };
        }

        let side = self.classify(position);
        if side == CurvePosition::Within {
            return Resolved {
                kind: ResolvedKind::Hit(self.keys.find_segment(position)),
                cycle: 0.0,
            };
        }

        let loop_type = match side {
            CurvePosition::Before => self.pre_loop,
            _ => self.post_loop,
        };
        let boundary_index = match side {
            CurvePosition::Before => 0,
            _ => n - 1,
        };

        match loop_type {
            LoopType::Constant => Resolved {
                kind: ResolvedKind::Hit(SegmentHit::Key(boundary_index)),
                cycle: 0.0,
            },
            LoopType::Linear => Resolved {
                kind: ResolvedKind::Extend(side),
                cycle: 0.0,
            },
            LoopType::Cycle | LoopType::CycleOffset | LoopType::Oscillate => {
                // `first`/`last` exist because n >= 2 here.
                let first = self.keys.first().map(Keyframe::position).unwrap_or(0.0);
                let last = self.keys.last().map(Keyframe::position).unwrap_or(0.0);
                let duration = last - first;
                if duration <= 0.0 {
                    // All keys share one position; cycling degenerates to a
                    // clamp.
                    return Resolved {
                        kind: ResolvedKind::Hit(SegmentHit::Key(boundary_index)),
                        cycle: 0.0,
                    };
                }
                let cycle = ((position - first) / duration).floor();
                let mut virtual_pos = (position - cycle * duration).clamp(first, last);
                if loop_type == LoopType::Oscillate && (cycle as i64) % 2 != 0 {
                    virtual_pos = (first + last - virtual_pos).clamp(first, last);
                }
                Resolved {
                    kind: ResolvedKind::Hit(self.keys.find_segment(virtual_pos)),
                    cycle: if loop_type == LoopType::CycleOffset { cycle } else { 0.0 },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::CurveKey;

    fn ramp(post: LoopType) -> Curve<CurveKey<f32>> {
        Curve::from_keys(
            vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 10.0)],
            Sampler::Linear,
            LoopType::Constant,
            post,
        )
        .unwrap()
    }

    #[test]
    fn empty_curve_evaluates_to_default() {
        let curve: Curve<CurveKey<f32>> = Curve::from_keys(
            Vec::new(),
            Sampler::Linear,
            LoopType::Constant,
            LoopType::Constant,
        )
        .unwrap();
        assert_eq!(curve.evaluate(3.0), 0.0);
    }

    #[test]
    fn single_key_curve_is_constant_everywhere() {
        let curve = Curve::from_keys(
            vec![CurveKey::new(2.0, 7.0f32)],
            Sampler::Smooth,
            LoopType::Cycle,
            LoopType::Oscillate,
        )
        .unwrap();
        for p in [-10.0, 0.0, 2.0, 100.0] {
            assert_eq!(curve.evaluate(p), 7.0);
        }
    }

    #[test]
    fn cycle_count_is_floor_based_on_both_sides() {
        let curve = ramp(LoopType::CycleOffset);
        assert_eq!(curve.resolve(2.5).cycle, 2.0);
        let pre = Curve::from_keys(
            vec![CurveKey::new(0.0, 0.0f32), CurveKey::new(1.0, 10.0)],
            Sampler::Linear,
            LoopType::CycleOffset,
            LoopType::Constant,
        )
        .unwrap();
        assert_eq!(pre.resolve(-0.5).cycle, -1.0);
    }

    #[test]
    fn degenerate_cyclic_range_clamps() {
        let curve = Curve::from_keys(
            vec![CurveKey::new(1.0, 3.0f32), CurveKey::new(1.0, 4.0)],
            Sampler::Linear,
            LoopType::Cycle,
            LoopType::Cycle,
        )
        .unwrap();
        assert_eq!(curve.evaluate(0.0), 3.0);
        assert_eq!(curve.evaluate(5.0), 4.0);
    }
}
