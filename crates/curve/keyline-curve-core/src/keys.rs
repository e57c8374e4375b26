//! Ordered keyframe collection with sparse per-segment sampler overrides.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::key::Keyframe;
use crate::sampler::Sampler;
use crate::value::SampleValue;

/// Result of locating a position inside the key range.
///
/// `Key` is an exact position hit (the first of any duplicate positions, so
/// the stored value is returned bit-for-bit); `Segment` is a bracketing pair
/// with the local interpolation factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentHit {
    Key(usize),
    Segment { left: usize, right: usize, t: f32 },
}

/// An ordered sequence of keyframes plus optional per-key sampler overrides.
///
/// Overrides are sparse (most keys use the curve's default sampler) and apply
/// per segment through the sampler bound to the segment's first key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveKeys<K> {
    keys: Vec<K>,
    #[serde(default = "HashMap::new")]
    overrides: HashMap<usize, Sampler>,
}

impl<K: Keyframe> CurveKeys<K> {
    /// Build a collection from caller-supplied keys.
    ///
    /// Keys are stably sorted by position, so authoring order is preserved
    /// among duplicate positions. Non-finite positions and values or tangents
    /// with mismatched element counts are rejected; the collection invariants
    /// are what keep evaluation infallible.
    pub fn new(mut keys: Vec<K>) -> Result<Self, CurveError> {
        for k in &keys {
            if !k.position().is_finite() {
                return Err(CurveError::NonFinitePosition(k.position()));
            }
        }
        keys.sort_by(|a, b| {
            a.position()
                .partial_cmp(&b.position())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(first) = keys.first() {
            let reference = first.value().clone();
            for k in &keys {
                for candidate in [k.value().clone(), k.tangent_in(), k.tangent_out()] {
                    if !reference.compatible_with(&candidate) {
                        return Err(CurveError::ShapeMismatch {
                            expected: reference.element_count(),
                            found: candidate.element_count(),
                        });
                    }
                }
            }
        }
        Ok(Self {
            keys,
            overrides: HashMap::new(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&K> {
        self.keys.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&K> {
        self.keys.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }

    /// Replace the sampler used for the segment starting at `index`.
    pub fn override_sampler(&mut self, index: usize, sampler: Sampler) -> Result<(), CurveError> {
        if index >= self.keys.len() {
            return Err(CurveError::KeyIndexOutOfRange {
                index,
                len: self.keys.len(),
            });
        }
        self.overrides.insert(index, sampler);
        Ok(())
    }

    /// The override bound to the first key of a segment, if any.
    #[inline]
    pub fn sampler_for_segment(&self, left_index: usize) -> Option<Sampler> {
        self.overrides.get(&left_index).copied()
    }

    #[inline]
    pub fn overrides(&self) -> &HashMap<usize, Sampler> {
        &self.overrides
    }

    /// Locate `position` inside the key range.
    ///
    /// Callers guarantee `first <= position <= last` and at least two keys;
    /// the lookup is a binary search over the sorted positions.
    pub fn find_segment(&self, position: f32) -> SegmentHit {
        let idx = self.keys.partition_point(|k| k.position() < position);
        if let Some(k) = self.keys.get(idx) {
            if k.position() == position {
                return SegmentHit::Key(idx);
            }
        }
        // Positions outside the range (only reachable through NaN queries)
        // clamp to the nearest key.
        if idx == 0 {
            return SegmentHit::Key(0);
        }
        if idx >= self.keys.len() {
            return SegmentHit::Key(self.keys.len() - 1);
        }
        let left = idx - 1;
        let right = idx;
        let p1 = self.keys[left].position();
        let p2 = self.keys[right].position();
        // Coincident positions would divide by zero; the segment is then
        // fully elapsed.
        let t = if p2 > p1 { (position - p1) / (p2 - p1) } else { 1.0 };
        SegmentHit::Segment { left, right, t }
    }
}
