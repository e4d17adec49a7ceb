use super::*;
use crate::value::{PropertyValue, Unit};

#[test]
fn same_unit_numbers_lerp() {
    let from = PropertyValue::Number(0.0, Unit::Px);
    let to = PropertyValue::Number(100.0, Unit::Px);
    assert_eq!(interpolate(&from, &to, 0.5), "50px");
}

#[test]
fn endpoints_are_exact() {
    let from = PropertyValue::Number(0.0, Unit::Px);
    let to = PropertyValue::Number(100.0, Unit::Px);
    assert_eq!(interpolate(&from, &to, 0.0), "0px");
    assert_eq!(interpolate(&from, &to, 1.0), "100px");
}

#[test]
fn cross_unit_pair_emits_deferred_marker() {
    let from = PropertyValue::Number(100.0, Unit::Vw);
    let to = PropertyValue::Number(-100.0, Unit::Percent);
    let result = interpolate(&from, &to, 0.5);
    assert!(result.starts_with(CROSS_UNIT_MARKER_PREFIX));
    assert_eq!(result, "CROSS_UNIT_INTERPOLATION:100vw:-100%:0.5");
}

#[test]
fn calc_endpoint_emits_deferred_marker_instead_of_stepping() {
    let from = PropertyValue::parse("calc(100% - 20px)");
    let to = PropertyValue::Number(0.0, Unit::Px);
    let result = interpolate(&from, &to, 0.5);
    assert!(result.starts_with(CROSS_UNIT_MARKER_PREFIX), "got {result:?}");
}

#[test]
fn colors_lerp_channelwise() {
    let from = PropertyValue::parse("#000000");
    let to = PropertyValue::parse("#ffffff");
    let mid = interpolate(&from, &to, 0.5);
    assert!(mid.starts_with("rgb("));
}

#[test]
fn mismatched_keywords_step_at_half() {
    let from = PropertyValue::Keyword("cover".into());
    let to = PropertyValue::Keyword("contain".into());
    assert_eq!(interpolate(&from, &to, 0.3), "cover");
    assert_eq!(interpolate(&from, &to, 0.7), "contain");
}

#[test]
fn matching_keywords_never_step() {
    let from = PropertyValue::Keyword("cover".into());
    let to = PropertyValue::Keyword("cover".into());
    assert_eq!(interpolate(&from, &to, 0.9), "cover");
}

#[test]
fn color_vs_keyword_type_mismatch_steps() {
    let from = PropertyValue::parse("#ff0000");
    let to = PropertyValue::Keyword("none".into());
    assert_eq!(interpolate(&from, &to, 0.1), from.to_css_string());
    assert_eq!(interpolate(&from, &to, 0.9), "none");
}

#[test]
fn gradients_with_matching_shape_interpolate() {
    let from = PropertyValue::parse("linear-gradient(0deg, #000000 0%, #ffffff 100%)");
    let to = PropertyValue::parse("linear-gradient(0deg, #ffffff 0%, #000000 100%)");
    let mid = interpolate(&from, &to, 0.5);
    assert!(mid.starts_with("linear-gradient("));
}

#[test]
fn clip_paths_with_matching_shape_interpolate() {
    let from = PropertyValue::parse("inset(0px 0px 0px 0px)");
    let to = PropertyValue::parse("inset(10px 10px 10px 10px)");
    let mid = interpolate(&from, &to, 0.5);
    assert!(mid.starts_with("inset("));
}
