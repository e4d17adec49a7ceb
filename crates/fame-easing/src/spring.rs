use std::f32::consts::PI;

use fame_core::FameError;
use serde::{Deserialize, Serialize};

/// Shape parameters for the `Spring` easing variant. Unlike a `SpringSpec`
/// integrated step by step over time, this is never integrated — it parameterizes a
/// closed-form curve sampled at a single `u`, so a keyframe segment can be
/// resampled at any progress without replaying every step before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Overshoot strength. Larger values bounce further past the endpoints.
    pub amplitude: f32,
    /// Oscillation period, in units of `u` (not seconds).
    pub period: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            period: 0.3,
        }
    }
}

impl SpringConfig {
    pub fn new(amplitude: f32, period: f32) -> Result<Self, FameError> {
        if !(1.0..=5.0).contains(&amplitude) {
            return Err(FameError::SpringAmplitudeOutOfRange(amplitude));
        }
        if !(0.1..=2.0).contains(&period) {
            return Err(FameError::SpringPeriodOutOfRange(period));
        }
        Ok(Self { amplitude, period })
    }
}

/// Closed-form damped-sine "elastic" ease-out, sampled per segment.
///
/// `e(u) = 1 − amplitude · 2^(−10u) · sin((u·10 − period_offset) · (2π/period))`,
/// with `period_offset = period / 4` so the curve departs 0 moving upward
/// (the conventional elastic-out phase), and endpoints clamped exactly to
/// `e(0) = 0`, `e(1) = 1` regardless of floating point drift in the sine term.
pub fn spring_ease(u: f32, config: SpringConfig) -> f32 {
    if u <= 0.0 {
        return 0.0;
    }
    if u >= 1.0 {
        return 1.0;
    }

    let period_offset = config.period / 4.0;
    let angular = (u * 10.0 - period_offset) * (2.0 * PI / config.period);
    1.0 - config.amplitude * 2f32.powf(-10.0 * u) * angular.sin()
}
