use super::*;

#[test]
fn parses_inset_with_four_values() {
    let c = parse_clip_path("inset(1px 2px 3px 4px)").unwrap();
    match c {
        ClipPath::Inset { top, right, bottom, left, .. } => {
            assert_eq!(top.value, 1.0);
            assert_eq!(right.value, 2.0);
            assert_eq!(bottom.value, 3.0);
            assert_eq!(left.value, 4.0);
        }
        _ => panic!("expected Inset"),
    }
}

#[test]
fn parses_circle_with_position() {
    let c = parse_clip_path("circle(50% at 10px 20px)").unwrap();
    match c {
        ClipPath::Circle { radius, position } => {
            assert_eq!(radius.unit, "%");
            assert_eq!(position, "10px 20px");
        }
        _ => panic!("expected Circle"),
    }
}

#[test]
fn parses_polygon_points() {
    let c = parse_clip_path("polygon(0px 0px, 100px 0px, 50px 100px)").unwrap();
    match c {
        ClipPath::Polygon { points } => assert_eq!(points.len(), 3),
        _ => panic!("expected Polygon"),
    }
}

#[test]
fn interpolates_matching_inset_shapes() {
    let a = parse_clip_path("inset(0px 0px 0px 0px)").unwrap();
    let b = parse_clip_path("inset(10px 10px 10px 10px)").unwrap();
    let mid = interpolate_clip_path(&a, &b, 0.5).unwrap();
    assert!(mid.contains('5'));
}

#[test]
fn mismatched_shapes_return_none() {
    let a = parse_clip_path("circle(50% at center)").unwrap();
    let b = parse_clip_path("inset(1px 1px 1px 1px)").unwrap();
    assert!(interpolate_clip_path(&a, &b, 0.5).is_none());
}

#[test]
fn mismatched_polygon_point_counts_return_none() {
    let a = parse_clip_path("polygon(0px 0px, 10px 10px)").unwrap();
    let b = parse_clip_path("polygon(0px 0px, 10px 10px, 20px 20px)").unwrap();
    assert!(interpolate_clip_path(&a, &b, 0.5).is_none());
}
