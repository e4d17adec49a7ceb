//! Distributed Property Expander (C20): materializes per-element `from`/`to`
//! values from a comma-separated or linear-range authoring pattern, then
//! rebuilds a slot's master timeline once per element so each element plays
//! its own resolved endpoints.

use fame_core::FameError;
use fame_style::PropertyValue;
use fame_timeline::{MasterTimeline, PropertyKeyframe, PropertyTimeline};
use serde::{Deserialize, Serialize};

/// One endpoint's distribution pattern (§4.20).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DistributionPattern {
    /// Tokenized on commas; element `i` gets `values[i mod k]`, cycling.
    CommaSeparated { values: String },
    /// `"minVal..maxVal"`; element `i` of `n` gets the value linearly
    /// interpolated across `[0, n-1]`. Only meaningful for numeric
    /// endpoints — a non-numeric range logs a warning and falls back to the
    /// `minVal` side for every element.
    LinearRange { values: String },
}

/// Materializes `n` per-element values from `pattern`. Per §4's "zero
/// elements" edge case, `n == 0` always yields an empty result (expansion is
/// skipped upstream; a caller that reaches here with nothing to expand over
/// gets nothing back).
pub fn expand_distributed_values(pattern: &DistributionPattern, n: usize) -> Vec<PropertyValue> {
    if n == 0 {
        return Vec::new();
    }
    match pattern {
        DistributionPattern::CommaSeparated { values } => {
            let tokens: Vec<&str> = values.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
            if tokens.is_empty() {
                log::warn!("comma-separated distribution pattern {values:?} has no values; nothing to distribute");
                return vec![PropertyValue::Keyword(String::new()); n];
            }
            (0..n).map(|i| PropertyValue::parse(tokens[i % tokens.len()])).collect()
        }
        DistributionPattern::LinearRange { values } => expand_linear_range(values, n),
    }
}

fn expand_linear_range(raw: &str, n: usize) -> Vec<PropertyValue> {
    let Some((min_raw, max_raw)) = raw.split_once("..") else {
        log::warn!("linear-range distribution pattern {raw:?} is missing '..'; treating it as a constant");
        return vec![PropertyValue::parse(raw.trim()); n];
    };
    let min_value = PropertyValue::parse(min_raw.trim());
    let max_value = PropertyValue::parse(max_raw.trim());

    match (&min_value, &max_value) {
        (PropertyValue::Number(min_n, unit), PropertyValue::Number(max_n, _)) => (0..n)
            .map(|i| {
                let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
                PropertyValue::Number(min_n + (max_n - min_n) * t, *unit)
            })
            .collect(),
        _ => {
            log::warn!("linear-range distribution pattern {raw:?} is not numeric on both ends; using the min value for every element");
            vec![min_value; n]
        }
    }
}

/// Sets `timeline`'s `distributed_from_values`/`distributed_to_values`
/// fields from the resolved patterns, against `element_count` elements.
pub fn populate_distribution(
    timeline: &mut PropertyTimeline,
    from_pattern: Option<&DistributionPattern>,
    to_pattern: Option<&DistributionPattern>,
    element_count: usize,
) {
    timeline.distributed_from_values = from_pattern.map(|p| expand_distributed_values(p, element_count));
    timeline.distributed_to_values = to_pattern.map(|p| expand_distributed_values(p, element_count));
}

/// Rebuilds `master` for one element: every child `PropertyTimeline` that
/// carries distributed values has its first (and/or last) keyframe value
/// swapped for that element's resolved endpoint, times and easings
/// untouched; timelines without distributed values pass through unchanged.
pub fn expand_master_timeline_for_element(master: &MasterTimeline, element_index: usize) -> Result<MasterTimeline, FameError> {
    let rebuilt: Vec<PropertyTimeline> = master
        .property_timelines()
        .iter()
        .map(|timeline| {
            if timeline.distributed_from_values.is_none() && timeline.distributed_to_values.is_none() {
                Ok(timeline.clone())
            } else {
                rebuild_for_element(timeline, element_index)
            }
        })
        .collect::<Result<_, FameError>>()?;
    MasterTimeline::new(rebuilt)
}

fn rebuild_for_element(timeline: &PropertyTimeline, element_index: usize) -> Result<PropertyTimeline, FameError> {
    let mut keyframes: Vec<PropertyKeyframe> = timeline.keyframes().to_vec();

    if let Some(value) = timeline.distributed_from_values.as_ref().and_then(|v| v.get(element_index)) {
        if let Some(first) = keyframes.first_mut() {
            first.value = value.clone();
        }
    }
    if let Some(value) = timeline.distributed_to_values.as_ref().and_then(|v| v.get(element_index)) {
        if let Some(last) = keyframes.last_mut() {
            last.value = value.clone();
        }
    }

    let mut rebuilt = PropertyTimeline::new(timeline.property.clone(), keyframes)?;
    rebuilt.interpolator = timeline.interpolator;
    rebuilt.unit = timeline.unit;
    rebuilt.spring_config = timeline.spring_config;
    Ok(rebuilt)
}

#[cfg(test)]
#[path = "tests/distribute_tests.rs"]
mod tests;
