//! Keyline curve core (engine-agnostic)
//!
//! A generic keyframe curve evaluation engine: ordered keys, pluggable
//! interpolation strategies (step, linear, Hermite smooth, cubic spline with
//! explicit tangents), five-way pre/post loop behavior, and a pooled
//! zero-allocation path for array-valued curves. `Curve::evaluate` is the
//! sole entry point; everything is immutable after assembly and safe to
//! evaluate from any number of threads.

pub mod array;
pub mod curve;
pub mod error;
pub mod key;
pub mod keys;
pub mod pool;
pub mod sampler;
pub mod value;

// Re-exports for consumers (content pipeline, adapters)
pub use array::ArrayKeyframe;
pub use curve::{Curve, LoopType};
pub use error::CurveError;
pub use key::{Continuity, CurveKey, Keyframe, SmoothKey};
pub use keys::{CurveKeys, SegmentHit};
pub use pool::{ScratchBuffer, ScratchPool};
pub use sampler::{CurvePosition, Sampler};
pub use value::{ArrayValue, Quat, SampleValue};
