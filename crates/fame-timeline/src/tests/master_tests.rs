use super::*;
use crate::keyframe::PropertyKeyframe;
use fame_style::PropertyValue;

fn timeline(property: &str, end_time: f64, end_value: &str) -> PropertyTimeline {
    PropertyTimeline::new(
        property,
        vec![
            PropertyKeyframe::new(0.0, PropertyValue::parse("0px")),
            PropertyKeyframe::new(end_time, PropertyValue::parse(end_value)),
        ],
    )
    .unwrap()
}

#[test]
fn rejects_empty_property_timeline_list() {
    assert!(MasterTimeline::new(vec![]).is_err());
}

#[test]
fn total_duration_is_max_over_children() {
    let master = MasterTimeline::new(vec![timeline("opacity", 1.0, "1"), timeline("translateX", 2.5, "100px")]).unwrap();
    assert_eq!(master.total_duration_s(), 2.5);
}

#[test]
fn values_at_time_returns_one_entry_per_property() {
    let master = MasterTimeline::new(vec![timeline("opacity", 1.0, "1"), timeline("translateX", 1.0, "100px")]).unwrap();
    let values = master.values_at_time(1.0);
    assert_eq!(values.len(), 2);
    assert_eq!(values.get("opacity").unwrap(), "1");
    assert_eq!(values.get("translateX").unwrap(), "100px");
}

#[test]
fn initial_values_samples_every_child_at_its_first_keyframe() {
    let master = MasterTimeline::new(vec![timeline("opacity", 1.0, "1")]).unwrap();
    let values = master.initial_values();
    assert_eq!(values.get("opacity").unwrap(), "0px");
}

#[test]
fn swapped_endpoints_applies_to_every_child() {
    let master = MasterTimeline::new(vec![timeline("opacity", 1.0, "1")]).unwrap();
    let swapped = master.with_swapped_endpoints();
    assert_eq!(swapped.property_timelines()[0].initial_value(), "1");
}
