use keyline_curve_core::{
    Curve, CurveKey, LoopType, Quat, Sampler, SampleValue, SmoothKey,
};
use keyline_test_fixtures::{mixed_continuity, scalar_ramp, smooth_arc};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn evaluation_is_exact_at_keys() {
    let keys = vec![
        (0.0f32, 1.5f32),
        (0.3, -2.0),
        (1.0, 7.25),
        (2.5, 0.125),
    ];
    for sampler in [Sampler::Step, Sampler::Linear, Sampler::Smooth] {
        let curve = Curve::from_keys(
            keys.iter().map(|(p, v)| CurveKey::new(*p, *v)).collect(),
            sampler,
            LoopType::Constant,
            LoopType::Constant,
        )
        .unwrap();
        for (p, v) in &keys {
            assert_eq!(curve.evaluate(*p), *v, "sampler {sampler:?} at {p}");
        }
    }
}

#[test]
fn linear_midpoint() {
    let curve = scalar_ramp(LoopType::Constant, LoopType::Constant);
    assert_eq!(curve.evaluate(0.5), 5.0);
}

#[test]
fn step_holds_until_segment_end() {
    let curve = Curve::from_keys(
        vec![CurveKey::new(0.0, 1.0f32), CurveKey::new(1.0, 2.0)],
        Sampler::Step,
        LoopType::Constant,
        LoopType::Constant,
    )
    .unwrap();
    assert_eq!(curve.evaluate(0.999), 1.0);
    assert_eq!(curve.evaluate(1.0), 2.0);
}

#[test]
fn hermite_endpoints_ignore_tangents() {
    let curve = smooth_arc();
    assert_eq!(curve.evaluate(0.0), 0.0);
    assert_eq!(curve.evaluate(1.0), 10.0);
}

#[test]
fn hermite_interior_matches_basis_math() {
    // Keys (0, 0, out=2) and (1, 10, in=3) at t = 0.5:
    // h00=0.5, h10=0.125, h01=0.5, h11=-0.125
    // 0*0.5 + 2*0.125 + 10*0.5 + 3*(-0.125) = 4.875
    let curve = smooth_arc();
    approx(curve.evaluate(0.5), 4.875, 1e-6);
}

#[test]
fn constant_loop_clamps_both_sides() {
    let curve = scalar_ramp(LoopType::Constant, LoopType::Constant);
    assert_eq!(curve.evaluate(-5.0), curve.evaluate(0.0));
    assert_eq!(curve.evaluate(5.0), curve.evaluate(1.0));
}

#[test]
fn linear_loop_projects_along_tangents() {
    let curve = Curve::from_keys(
        vec![
            SmoothKey::new(0.0, 0.0f32, 1.0, 0.0),
            SmoothKey::new(1.0, 10.0, 0.0, 2.0),
        ],
        Sampler::Smooth,
        LoopType::Linear,
        LoopType::Linear,
    )
    .unwrap();
    // Before: value - tangent_in * (first - position).
    approx(curve.evaluate(-2.0), 0.0 - 1.0 * 2.0, 1e-6);
    // After: value + tangent_out * (position - last).
    approx(curve.evaluate(3.0), 10.0 + 2.0 * 2.0, 1e-6);
}

#[test]
fn cycle_repeats_the_curve() {
    let curve = scalar_ramp(LoopType::Cycle, LoopType::Cycle);
    for n in 0..4 {
        for x in [0.0f32, 0.25, 0.5, 0.75] {
            approx(curve.evaluate(1.0 + n as f32 + x), curve.evaluate(x), 1e-5);
        }
    }
    approx(curve.evaluate(-0.75), curve.evaluate(0.25), 1e-5);
}

#[test]
fn cycle_offset_ramps_per_cycle() {
    let curve = scalar_ramp(LoopType::CycleOffset, LoopType::CycleOffset);
    let delta = 10.0;
    for n in 0..3 {
        for x in [0.0f32, 0.25, 0.5] {
            let expected = curve.evaluate(x) + delta * (n as f32 + 1.0);
            approx(curve.evaluate(1.0 + n as f32 + x), expected, 1e-4);
        }
    }
    // One whole cycle before the curve shifts down by the same delta.
    approx(curve.evaluate(-0.75), curve.evaluate(0.25) - delta, 1e-5);
}

#[test]
fn oscillate_mirrors_odd_cycles() {
    let curve = scalar_ramp(LoopType::Oscillate, LoopType::Oscillate);
    for x in [0.0f32, 0.25, 0.5, 0.75] {
        approx(curve.evaluate(1.0 + x), curve.evaluate(1.0 - x), 1e-5);
        // Even cycles play forward again.
        approx(curve.evaluate(2.0 + x), curve.evaluate(x), 1e-5);
    }
    approx(curve.evaluate(-0.25), curve.evaluate(0.25), 1e-5);
}

#[test]
fn per_segment_overrides_mix_samplers() {
    let curve = mixed_continuity();
    // Segment 0 is overridden to step, segment 1 stays linear.
    assert_eq!(curve.evaluate(0.5), 1.0);
    assert_eq!(curve.evaluate(1.5), 3.0);
}

#[test]
fn duplicate_positions_return_first_stored_value() {
    let curve = Curve::from_keys(
        vec![
            CurveKey::new(0.0, 0.0f32),
            CurveKey::new(1.0, 5.0),
            CurveKey::new(1.0, 9.0),
            CurveKey::new(2.0, 10.0),
        ],
        Sampler::Linear,
        LoopType::Constant,
        LoopType::Constant,
    )
    .unwrap();
    assert_eq!(curve.evaluate(1.0), 5.0);
    // Past the duplicate pair the second value drives the segment.
    approx(curve.evaluate(1.5), 9.5, 1e-6);
}

#[test]
fn vector_and_quaternion_curves_share_the_math() {
    let v3 = Curve::from_keys(
        vec![
            CurveKey::new(0.0, [0.0f32, 0.0, 0.0]),
            CurveKey::new(1.0, [2.0, 4.0, -6.0]),
        ],
        Sampler::Linear,
        LoopType::Constant,
        LoopType::Constant,
    )
    .unwrap();
    assert_eq!(v3.evaluate(0.5), [1.0, 2.0, -3.0]);

    let q = Curve::from_keys(
        vec![
            CurveKey::new(0.0, Quat([0.0, 0.0, 0.0, 1.0])),
            CurveKey::new(1.0, Quat([1.0, 0.0, 0.0, 0.0])),
        ],
        Sampler::Linear,
        LoopType::Constant,
        LoopType::Constant,
    )
    .unwrap();
    let mid = q.evaluate(0.5).normalized();
    approx(mid.0[0], std::f32::consts::FRAC_1_SQRT_2, 1e-5);
    approx(mid.0[3], std::f32::consts::FRAC_1_SQRT_2, 1e-5);
}

#[test]
fn empty_quaternion_curve_yields_identity() {
    let curve: Curve<CurveKey<Quat>> = Curve::from_keys(
        Vec::new(),
        Sampler::Smooth,
        LoopType::Constant,
        LoopType::Constant,
    )
    .unwrap();
    assert_eq!(curve.evaluate(0.0), Quat::IDENTITY);
}

#[test]
fn curves_serialize_round_trip() {
    let curve = mixed_continuity();
    let json = serde_json::to_string(&curve).unwrap();
    let back: Curve<CurveKey<f32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, curve);
    assert_eq!(back.evaluate(0.5), curve.evaluate(0.5));
}

#[test]
fn cycle_offset_applies_to_vector_values() {
    let curve = Curve::from_keys(
        vec![
            CurveKey::new(0.0, [0.0f32, 1.0]),
            CurveKey::new(1.0, [4.0, 3.0]),
        ],
        Sampler::Linear,
        LoopType::Constant,
        LoopType::CycleOffset,
    )
    .unwrap();
    let base = curve.evaluate(0.5);
    let looped = curve.evaluate(1.5);
    let delta = [4.0f32, 3.0].sub(&[0.0, 1.0]);
    approx(looped[0], base[0] + delta[0], 1e-5);
    approx(looped[1], base[1] + delta[1], 1e-5);
}
