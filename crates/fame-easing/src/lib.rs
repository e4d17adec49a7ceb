//! Named easing curves and spring shaping for FAME property timelines (C2).
//!
//! Generalizes an `Easing` enum and `cubic_bezier` Newton-Raphson solver to
//! the larger named set required by the timeline model, plus a per-segment
//! spring shape function. Every easing
//! here is a pure function of a single progress value `u ∈ [0, 1]` — nothing
//! in this crate holds state or touches time directly, since `PropertyTimeline`
//! resamples at arbitrary `u` within a segment, never walks forward in order.

mod spring;

use serde::{Deserialize, Serialize};

pub use spring::SpringConfig;

/// One of the named easing curves from the Easing Library, or a spring.
/// Segment-local: applied to `u`, the local progress between two keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EasingName {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    BackIn,
    BackOut,
    BackInOut,
    SmoothIn,
    SmoothOut,
    Pause,
    OutNIn,
    DramaticOutNIn,
    Spring,
}

impl Default for EasingName {
    fn default() -> Self {
        EasingName::Linear
    }
}

/// Apply `easing` to local progress `u`, clamped to `[0, 1]` first.
///
/// `spring` is only consulted when `easing == EasingName::Spring`; callers
/// that never reach that variant (the common case) may pass `None`.
pub fn ease(u: f32, easing: EasingName, spring: Option<&SpringConfig>) -> f32 {
    let u = u.clamp(0.0, 1.0);
    match easing {
        EasingName::Linear => u,
        EasingName::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, u),
        EasingName::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, u),
        EasingName::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, u),
        EasingName::CubicIn => u * u * u,
        EasingName::CubicOut => 1.0 - (1.0 - u).powi(3),
        EasingName::CubicInOut => cubic_bezier(0.65, 0.0, 0.35, 1.0, u),
        EasingName::ExpoIn => expo_in(u),
        EasingName::ExpoOut => expo_out(u),
        EasingName::ExpoInOut => expo_in_out(u),
        EasingName::BackIn => back_in(u),
        EasingName::BackOut => back_out(u),
        EasingName::BackInOut => back_in_out(u),
        EasingName::SmoothIn => cubic_bezier(0.3, 0.0, 0.7, 0.2, u),
        EasingName::SmoothOut => cubic_bezier(0.3, 0.8, 0.7, 1.0, u),
        EasingName::Pause => pause(u),
        EasingName::OutNIn => out_n_in(u),
        EasingName::DramaticOutNIn => dramatic_out_n_in(u),
        EasingName::Spring => spring::spring_ease(
            u,
            spring.copied().unwrap_or_default(),
        ),
    }
}

/// Cubic bezier curve, Newton-Raphson with binary-subdivision fallback,
/// operating on a plain `f32` fraction rather than a dedicated field type.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

fn expo_in(u: f32) -> f32 {
    if u <= 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * u - 10.0)
    }
}

fn expo_out(u: f32) -> f32 {
    if u >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * u)
    }
}

fn expo_in_out(u: f32) -> f32 {
    if u <= 0.0 {
        0.0
    } else if u >= 1.0 {
        1.0
    } else if u < 0.5 {
        2f32.powf(20.0 * u - 10.0) / 2.0
    } else {
        (2.0 - 2f32.powf(-20.0 * u + 10.0)) / 2.0
    }
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;

fn back_in(u: f32) -> f32 {
    BACK_C3 * u * u * u - BACK_C1 * u * u
}

fn back_out(u: f32) -> f32 {
    1.0 + BACK_C3 * (u - 1.0).powi(3) + BACK_C1 * (u - 1.0).powi(2)
}

fn back_in_out(u: f32) -> f32 {
    if u < 0.5 {
        ((2.0 * u).powi(2) * ((BACK_C2 + 1.0) * 2.0 * u - BACK_C2)) / 2.0
    } else {
        ((2.0 * u - 2.0).powi(2) * ((BACK_C2 + 1.0) * (u * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

/// Holds near 0 for the first third, eases through the middle, holds near 1
/// for the final third — a "dwell, move, dwell" shape rather than a smooth
/// acceleration curve.
fn pause(u: f32) -> f32 {
    if u < 1.0 / 3.0 {
        0.0
    } else if u > 2.0 / 3.0 {
        1.0
    } else {
        let local = (u - 1.0 / 3.0) * 3.0;
        cubic_bezier(0.42, 0.0, 0.58, 1.0, local)
    }
}

/// Eases out past the target then back in to it: a single overshoot-and-
/// return rather than the repeated oscillation of `Spring`.
fn out_n_in(u: f32) -> f32 {
    let overshoot = 1.25;
    if u < 0.5 {
        let local = u * 2.0;
        1.0 - (1.0 - local).powi(2) * (1.0 + overshoot * (1.0 - local))
    } else {
        let local = (u - 0.5) * 2.0;
        local * local * ((overshoot + 1.0) * local - overshoot)
    }
}

/// Like `OutNIn` but with a larger overshoot, for callers that want a more
/// theatrical swing past the endpoint before settling.
fn dramatic_out_n_in(u: f32) -> f32 {
    let overshoot = 2.5;
    if u < 0.5 {
        let local = u * 2.0;
        1.0 - (1.0 - local).powi(2) * (1.0 + overshoot * (1.0 - local))
    } else {
        let local = (u - 0.5) * 2.0;
        local * local * ((overshoot + 1.0) * local - overshoot)
    }
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod tests;
