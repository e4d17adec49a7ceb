use super::*;

#[test]
fn parses_linear_gradient_with_angle() {
    let g = parse_gradient("linear-gradient(180deg, #ff0000 0%, #0000ff 100%)").unwrap();
    assert_eq!(g.kind, GradientKind::Linear);
    assert_eq!(g.heading, "180deg");
    assert_eq!(g.stops.len(), 2);
    assert_eq!(g.stops[0].position_pct, Some(0.0));
    assert_eq!(g.stops[1].position_pct, Some(100.0));
}

#[test]
fn parses_gradient_without_explicit_heading() {
    let g = parse_gradient("linear-gradient(red, blue)").unwrap();
    assert_eq!(g.heading, "");
    assert_eq!(g.stops.len(), 2);
}

#[test]
fn parses_radial_gradient() {
    let g = parse_gradient("radial-gradient(circle at center, #fff 0%, #000 100%)").unwrap();
    assert_eq!(g.kind, GradientKind::Radial);
}

#[test]
fn interpolates_matching_shapes_stop_for_stop() {
    let a = parse_gradient("linear-gradient(0deg, #000000 0%, #ffffff 100%)").unwrap();
    let b = parse_gradient("linear-gradient(0deg, #ffffff 0%, #000000 100%)").unwrap();
    let mid = interpolate_gradient(&a, &b, 0.5).unwrap();
    assert!(mid.contains("128") || mid.contains("127"));
}

#[test]
fn mismatched_stop_counts_return_none() {
    let a = parse_gradient("linear-gradient(red, blue)").unwrap();
    let b = parse_gradient("linear-gradient(red, green, blue)").unwrap();
    assert!(interpolate_gradient(&a, &b, 0.5).is_none());
}

#[test]
fn mismatched_kind_returns_none() {
    let a = parse_gradient("linear-gradient(red, blue)").unwrap();
    let b = parse_gradient("radial-gradient(red, blue)").unwrap();
    assert!(interpolate_gradient(&a, &b, 0.5).is_none());
}
