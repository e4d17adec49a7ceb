use fame_core::FameError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::timeline::PropertyTimeline;

/// A slot's compiled animation: one independent `PropertyTimeline` per CSS
/// property, each with its own keyframes and duration (C4). `totalDuration`
/// is the max over every child, matching §4.4's composition rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterTimeline {
    property_timelines: Vec<PropertyTimeline>,
    total_duration_s: f64,
}

impl MasterTimeline {
    pub fn new(property_timelines: Vec<PropertyTimeline>) -> Result<Self, FameError> {
        if property_timelines.is_empty() {
            return Err(FameError::EmptyMasterTimeline);
        }
        let total_duration_s = property_timelines
            .iter()
            .map(|p| p.total_duration_s())
            .fold(0.0_f64, f64::max);
        Ok(Self { property_timelines, total_duration_s })
    }

    pub fn property_timelines(&self) -> &[PropertyTimeline] {
        &self.property_timelines
    }

    pub fn total_duration_s(&self) -> f64 {
        self.total_duration_s
    }

    /// Samples every child timeline at `t`, returning `propertyName ->
    /// interpolatedCssValue`, per §4.4's "union of per-property samples".
    pub fn values_at_time(&self, t: f64) -> FxHashMap<String, String> {
        self.property_timelines
            .iter()
            .map(|timeline| (timeline.property.clone(), timeline.value_at_time(t, None)))
            .collect()
    }

    /// Every property's initial (first-keyframe) value, sampled once at
    /// mount before any trigger has fired.
    pub fn initial_values(&self) -> FxHashMap<String, String> {
        self.property_timelines
            .iter()
            .map(|timeline| (timeline.property.clone(), timeline.initial_value()))
            .collect()
    }

    /// The timeline used to play `EASING_PRESERVATION` reverse: every child
    /// timeline gets its endpoint values swapped, times and easings intact.
    pub fn with_swapped_endpoints(&self) -> MasterTimeline {
        MasterTimeline {
            property_timelines: self.property_timelines.iter().map(PropertyTimeline::with_swapped_endpoints).collect(),
            total_duration_s: self.total_duration_s,
        }
    }
}

#[cfg(test)]
#[path = "tests/master_tests.rs"]
mod tests;
