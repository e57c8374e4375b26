//! The authored form of a curve asset and the build step that turns it into
//! an evaluatable [`Curve`].

use serde::{Deserialize, Serialize};

use keyline_curve_core::{Continuity, Curve, CurveKeys, LoopType, Sampler, SmoothKey};

use crate::error::ContentError;

/// One authored key row: the 5-tuple of the curve asset schema.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveKeyDef {
    pub position: f32,
    pub value: f32,
    pub tangent_in: f32,
    pub tangent_out: f32,
    pub continuity: Continuity,
}

/// A curve as authored: loop tags plus key rows. This is what the XML reader
/// produces and the binary cache stores.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveDefinition {
    pub pre_loop: LoopType,
    pub post_loop: LoopType,
    pub keys: Vec<CurveKeyDef>,
}

impl CurveDefinition {
    /// Assemble the evaluatable curve.
    ///
    /// The default sampler is `Smooth`; every key whose authored continuity
    /// differs gets a per-segment sampler override bound to it. Rows are
    /// stably sorted by position first so override indices line up with the
    /// collection's own ordering.
    pub fn build(&self) -> Result<Curve<SmoothKey<f32>>, ContentError> {
        let mut rows = self.keys.clone();
        rows.sort_by(|a, b| {
            a.position
                .partial_cmp(&b.position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let keys: Vec<SmoothKey<f32>> = rows
            .iter()
            .map(|row| SmoothKey::new(row.position, row.value, row.tangent_in, row.tangent_out))
            .collect();
        let mut keys = CurveKeys::new(keys)?;
        for (index, row) in rows.iter().enumerate() {
            match row.continuity {
                Continuity::Smooth => {}
                Continuity::Linear => keys.override_sampler(index, Sampler::Linear)?,
                Continuity::Step => keys.override_sampler(index, Sampler::Step)?,
            }
        }
        Ok(Curve::new(
            keys,
            Sampler::Smooth,
            self.pre_loop,
            self.post_loop,
        ))
    }

    /// Recover the authored form of a built curve, reading continuity back
    /// out of the per-segment sampler overrides.
    pub fn from_curve(curve: &Curve<SmoothKey<f32>>) -> Self {
        let keys = curve
            .keys()
            .iter()
            .enumerate()
            .map(|(index, key)| CurveKeyDef {
                position: key.position,
                value: key.value,
                tangent_in: key.tangent_in,
                tangent_out: key.tangent_out,
                continuity: match curve.keys().sampler_for_segment(index) {
                    Some(Sampler::Linear) => Continuity::Linear,
                    Some(Sampler::Step) => Continuity::Step,
                    _ => Continuity::Smooth,
                },
            })
            .collect();
        Self {
            pre_loop: curve.pre_loop(),
            post_loop: curve.post_loop(),
            keys,
        }
    }
}

pub(crate) fn loop_type_name(loop_type: LoopType) -> &'static str {
    match loop_type {
        LoopType::Constant => "Constant",
        LoopType::Cycle => "Cycle",
        LoopType::CycleOffset => "CycleOffset",
        LoopType::Oscillate => "Oscillate",
        LoopType::Linear => "Linear",
    }
}

pub(crate) fn loop_type_from_name(name: &str) -> Result<LoopType, ContentError> {
    match name {
        "Constant" => Ok(LoopType::Constant),
        "Cycle" => Ok(LoopType::Cycle),
        "CycleOffset" => Ok(LoopType::CycleOffset),
        "Oscillate" => Ok(LoopType::Oscillate),
        "Linear" => Ok(LoopType::Linear),
        other => Err(ContentError::UnknownLoopType(other.to_string())),
    }
}

pub(crate) fn continuity_name(continuity: Continuity) -> &'static str {
    match continuity {
        Continuity::Smooth => "Smooth",
        Continuity::Step => "Step",
        Continuity::Linear => "Linear",
    }
}

pub(crate) fn continuity_from_name(name: &str) -> Result<Continuity, ContentError> {
    match name {
        "Smooth" => Ok(Continuity::Smooth),
        "Step" => Ok(Continuity::Step),
        "Linear" => Ok(Continuity::Linear),
        other => Err(ContentError::UnknownContinuity(other.to_string())),
    }
}

pub(crate) fn loop_type_from_code(code: i32) -> Result<LoopType, ContentError> {
    match code {
        0 => Ok(LoopType::Constant),
        1 => Ok(LoopType::Cycle),
        2 => Ok(LoopType::CycleOffset),
        3 => Ok(LoopType::Oscillate),
        4 => Ok(LoopType::Linear),
        other => Err(ContentError::BadLoopCode(other)),
    }
}

pub(crate) fn continuity_from_code(code: i32) -> Result<Continuity, ContentError> {
    match code {
        0 => Ok(Continuity::Smooth),
        1 => Ok(Continuity::Step),
        2 => Ok(Continuity::Linear),
        other => Err(ContentError::BadContinuityCode(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> CurveDefinition {
        CurveDefinition {
            pre_loop: LoopType::Cycle,
            post_loop: LoopType::Constant,
            keys: vec![
                CurveKeyDef {
                    position: 0.0,
                    value: 0.0,
                    tangent_in: 0.0,
                    tangent_out: 2.0,
                    continuity: Continuity::Smooth,
                },
                CurveKeyDef {
                    position: 1.0,
                    value: 10.0,
                    tangent_in: 3.0,
                    tangent_out: 0.0,
                    continuity: Continuity::Linear,
                },
                CurveKeyDef {
                    position: 2.0,
                    value: 4.0,
                    tangent_in: 0.0,
                    tangent_out: 0.0,
                    continuity: Continuity::Step,
                },
            ],
        }
    }

    #[test]
    fn build_applies_continuity_overrides() {
        let curve = definition().build().unwrap();
        assert_eq!(curve.keys().sampler_for_segment(0), None);
        assert_eq!(curve.keys().sampler_for_segment(1), Some(Sampler::Linear));
        assert_eq!(curve.keys().sampler_for_segment(2), Some(Sampler::Step));
        // Segment 1 is linear despite the smooth default.
        assert_eq!(curve.evaluate(1.5), 7.0);
    }

    #[test]
    fn from_curve_round_trips_the_definition() {
        let def = definition();
        let rebuilt = CurveDefinition::from_curve(&def.build().unwrap());
        assert_eq!(rebuilt, def);
    }
}
