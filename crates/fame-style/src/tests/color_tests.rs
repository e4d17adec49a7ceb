use super::*;

#[test]
fn parses_short_hex() {
    let c = parse_color("#f00").unwrap();
    assert!((c.r - 1.0).abs() < 1e-6);
    assert!((c.g - 0.0).abs() < 1e-6);
    assert!((c.b - 0.0).abs() < 1e-6);
    assert_eq!(c.a, 1.0);
}

#[test]
fn parses_long_hex_with_alpha() {
    let c = parse_color("#00ff0080").unwrap();
    assert!((c.r - 0.0).abs() < 1e-6);
    assert!((c.g - 1.0).abs() < 1e-6);
    assert!((c.a - 128.0 / 255.0).abs() < 1e-3);
}

#[test]
fn parses_rgb_function() {
    let c = parse_color("rgb(255, 0, 0)").unwrap();
    assert!((c.r - 1.0).abs() < 1e-6);
}

#[test]
fn parses_rgba_function() {
    let c = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
    assert!((c.a - 0.5).abs() < 1e-6);
}

#[test]
fn parses_named_colors() {
    assert!(parse_color("black").is_some());
    assert!(parse_color("transparent").unwrap().a == 0.0);
}

#[test]
fn rejects_garbage() {
    assert!(parse_color("not-a-color").is_none());
}

#[test]
fn lerp_halfway_between_black_and_white() {
    let black = Rgba::new(0.0, 0.0, 0.0, 1.0);
    let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
    let mid = black.lerp(&white, 0.5);
    assert!((mid.r - 0.5).abs() < 1e-6);
}

#[test]
fn round_trips_through_css_string_and_back() {
    let c = parse_color("#336699").unwrap();
    let css = c.to_css_string();
    let reparsed = parse_color(&css).unwrap();
    assert!((c.r - reparsed.r).abs() < 1e-2);
    assert!((c.g - reparsed.g).abs() < 1e-2);
    assert!((c.b - reparsed.b).abs() < 1e-2);
}
