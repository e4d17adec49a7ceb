//! Construction-time errors for malformed authoring data.
//!
//! Per the error handling design, the §7 runtime conditions (bad keyframe,
//! unparseable color, missing element) never raise — they log and degrade.
//! `FameError` is reserved for the smaller set of conditions that are
//! programmer/config mistakes caught once, at construction time, rather than
//! on the per-frame hot path: an out-of-range `StaggerConfig` or `SpringConfig`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FameError {
    #[error("spring amplitude {0} out of range [1, 5]")]
    SpringAmplitudeOutOfRange(f32),

    #[error("spring period {0} out of range [0.1, 2]")]
    SpringPeriodOutOfRange(f32),

    #[error("stagger scrubWindow_pct {0} out of range [1, 100]")]
    ScrubWindowOutOfRange(u32),

    #[error("stagger delay {0}s must be finite and non-negative")]
    InvalidStaggerDelay(f32),

    #[error("property timeline {0:?} has no keyframes")]
    EmptyPropertyTimeline(String),

    #[error("master timeline has no property timelines")]
    EmptyMasterTimeline,
}
