use fame_core::FameError;
use fame_easing::{ease, SpringConfig};
use fame_style::{interpolate, PropertyValue, Unit};
use serde::{Deserialize, Serialize};

use crate::keyframe::PropertyKeyframe;

/// Declares how a property's values should be treated beyond what its
/// parsed `PropertyValue` variant already implies. `Auto` (the default)
/// dispatches purely on the keyframe values' variants; the other values
/// let an author force a classification `fame-style::interpolate` can't
/// infer from text alone (e.g. a custom property authored as bare numbers
/// that should nonetheless step like an enum).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum PropertyInterpolator {
    #[default]
    Auto,
    Numeric,
    EnumLike,
}

/// A per-property keyframe sequence (C3). Keyframes are kept sorted by time
/// and deduplicated (last value at a given time wins) as an invariant of
/// construction, never re-checked per sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTimeline {
    pub property: String,
    keyframes: Vec<PropertyKeyframe>,
    total_duration_s: f64,
    pub interpolator: PropertyInterpolator,
    pub unit: Option<Unit>,
    pub spring_config: Option<SpringConfig>,
    pub distributed_from_values: Option<Vec<PropertyValue>>,
    pub distributed_to_values: Option<Vec<PropertyValue>>,
}

impl PropertyTimeline {
    /// Sorts and deduplicates `keyframes` (last value at a given time wins),
    /// clamping any negative time to `0`. Fails only when the result would
    /// have no keyframes at all — every other malformed-input case degrades
    /// gracefully rather than raising, per the error handling design.
    pub fn new(property: impl Into<String>, mut keyframes: Vec<PropertyKeyframe>) -> Result<Self, FameError> {
        let property = property.into();
        if keyframes.is_empty() {
            return Err(FameError::EmptyPropertyTimeline(property));
        }

        for kf in &mut keyframes {
            if !kf.time_s.is_finite() || kf.time_s < 0.0 {
                log::warn!("property {property:?}: clamping invalid keyframe time {} to 0", kf.time_s);
                kf.time_s = 0.0;
            }
        }

        keyframes.sort_by(|a, b| a.time_s.partial_cmp(&b.time_s).unwrap_or(std::cmp::Ordering::Equal));

        let mut deduped: Vec<PropertyKeyframe> = Vec::with_capacity(keyframes.len());
        for kf in keyframes {
            match deduped.last_mut() {
                Some(last) if last.time_s == kf.time_s => *last = kf,
                _ => deduped.push(kf),
            }
        }

        let total_duration_s = deduped.last().map(|kf| kf.time_s).unwrap_or(0.0);

        Ok(Self {
            property,
            keyframes: deduped,
            total_duration_s,
            interpolator: PropertyInterpolator::default(),
            unit: None,
            spring_config: None,
            distributed_from_values: None,
            distributed_to_values: None,
        })
    }

    pub fn keyframes(&self) -> &[PropertyKeyframe] {
        &self.keyframes
    }

    pub fn total_duration_s(&self) -> f64 {
        self.total_duration_s
    }

    pub fn with_spring_config(mut self, spring: SpringConfig) -> Self {
        self.spring_config = Some(spring);
        self
    }

    /// Samples the timeline at time `t`, per §4.3's four-step algorithm:
    /// locate the bracketing keyframes, clamp to an endpoint if `t` falls
    /// outside them, otherwise compute local progress `u` and delegate to
    /// the C1 interpolator eased by the *arriving* keyframe's easing.
    pub fn value_at_time(&self, t: f64, spring_override: Option<&SpringConfig>) -> String {
        let first = &self.keyframes[0];
        if t <= first.time_s {
            return first.value.to_css_string();
        }
        let last = &self.keyframes[self.keyframes.len() - 1];
        if t >= last.time_s {
            return last.value.to_css_string();
        }

        let idx_after = self.keyframes.partition_point(|kf| kf.time_s <= t);
        let ka = &self.keyframes[idx_after];
        let kb = &self.keyframes[idx_after - 1];

        let span = ka.time_s - kb.time_s;
        let u = if span > 0.0 { ((t - kb.time_s) / span) as f32 } else { 1.0 };

        let spring = spring_override.copied().or(self.spring_config);
        let e = ease(u, ka.easing.unwrap_or_default(), spring.as_ref());

        interpolate(&kb.value, &ka.value, e)
    }

    /// The timeline's initial value: the first keyframe's value, per §4.4
    /// ("the first keyframe is the initial [value]").
    pub fn initial_value(&self) -> String {
        self.keyframes[0].value.to_css_string()
    }

    /// Produces the timeline used for `EASING_PRESERVATION` reverse playback
    /// (C5): first and last keyframe *values* are swapped endpoint-for-
    /// endpoint while every time and easing is preserved, so playing this
    /// timeline forward traces the same eased shape backward.
    pub fn with_swapped_endpoints(&self) -> PropertyTimeline {
        let mut swapped = self.clone();
        let last_idx = swapped.keyframes.len() - 1;
        if last_idx > 0 {
            swapped.keyframes.swap(0, last_idx);
            // Swapping values must not also swap times/easings; restore those.
            let (orig_first_time, orig_first_easing) = (self.keyframes[0].time_s, self.keyframes[0].easing.clone());
            let (orig_last_time, orig_last_easing) = (self.keyframes[last_idx].time_s, self.keyframes[last_idx].easing.clone());
            swapped.keyframes[0].time_s = orig_first_time;
            swapped.keyframes[0].easing = orig_first_easing;
            swapped.keyframes[last_idx].time_s = orig_last_time;
            swapped.keyframes[last_idx].easing = orig_last_easing;
        }
        swapped
    }
}

#[cfg(test)]
#[path = "tests/timeline_tests.rs"]
mod tests;
