//! Canned curves and authored-content fixtures shared by integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use keyline_curve_core::{
    ArrayValue, Curve, CurveKey, CurveKeys, LoopType, Sampler, SmoothKey,
};
use once_cell::sync::Lazy;

/// Dense sample grid reaching well past both curve ends.
pub static DENSE_POSITIONS: Lazy<Vec<f32>> =
    Lazy::new(|| (-30..=50).map(|i| i as f32 * 0.125).collect());

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// XML source for a three-key `Framework:Curve` asset mixing continuities.
pub fn wave_curve_xml() -> Result<String> {
    let path = fixtures_root().join("wave_curve.xml");
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

/// A two-key linear ramp over `[0, 1]` rising from 0 to 10.
pub fn scalar_ramp(pre: LoopType, post: LoopType) -> Curve<CurveKey<f32>> {
    Curve::from_keys(
        vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 10.0)],
        Sampler::Linear,
        pre,
        post,
    )
    .expect("ramp keys are valid")
}

/// A two-key Hermite curve with deliberately asymmetric tangents.
pub fn smooth_arc() -> Curve<SmoothKey<f32>> {
    Curve::from_keys(
        vec![
            SmoothKey::new(0.0, 0.0, 0.0, 2.0),
            SmoothKey::new(1.0, 10.0, 3.0, 0.0),
        ],
        Sampler::Smooth,
        LoopType::Constant,
        LoopType::Constant,
    )
    .expect("arc keys are valid")
}

/// A three-element array curve over `[0, 2]`.
pub fn array_ramp(post: LoopType) -> Curve<CurveKey<ArrayValue>> {
    Curve::from_keys(
        vec![
            CurveKey::new(0.0, ArrayValue(vec![0.0, 1.0, -1.0])),
            CurveKey::new(1.0, ArrayValue(vec![1.0, 2.0, 0.0])),
            CurveKey::new(2.0, ArrayValue(vec![4.0, 3.0, 2.0])),
        ],
        Sampler::Linear,
        LoopType::Constant,
        post,
    )
    .expect("array keys are valid")
}

/// A three-key scalar curve with a step override on the first segment.
pub fn mixed_continuity() -> Curve<CurveKey<f32>> {
    let mut keys = CurveKeys::new(vec![
        CurveKey::new(0.0, 1.0),
        CurveKey::new(1.0, 2.0),
        CurveKey::new(2.0, 4.0),
    ])
    .expect("mixed keys are valid");
    keys.override_sampler(0, Sampler::Step)
        .expect("index 0 exists");
    Curve::new(keys, Sampler::Linear, LoopType::Constant, LoopType::Constant)
}
