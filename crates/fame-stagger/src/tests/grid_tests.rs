use fame_dom::Rect;

use super::*;

fn rect(x: f64, y: f64) -> Rect {
    Rect { x, y, width: 50.0, height: 20.0 }
}

#[test]
fn buckets_a_uniform_grid_into_rows_and_columns() {
    // 2x3 grid, 100px apart on both axes.
    let rects = vec![
        rect(0.0, 0.0),
        rect(100.0, 0.0),
        rect(200.0, 0.0),
        rect(0.0, 100.0),
        rect(100.0, 100.0),
        rect(200.0, 100.0),
    ];
    let positions = infer_grid(&rects, 10.0);
    assert_eq!(positions[0], GridPosition { row: 0, col: 0 });
    assert_eq!(positions[2], GridPosition { row: 0, col: 2 });
    assert_eq!(positions[3], GridPosition { row: 1, col: 0 });
    assert_eq!(positions[5], GridPosition { row: 1, col: 2 });
}

#[test]
fn jittered_positions_within_tolerance_share_a_bucket() {
    // same row, small sub-pixel jitter that should still bucket together.
    let rects = vec![rect(0.0, 0.0), rect(100.0, 3.0), rect(200.0, -2.0)];
    let positions = infer_grid(&rects, 10.0);
    assert_eq!(positions[0].row, positions[1].row);
    assert_eq!(positions[1].row, positions[2].row);
}

#[test]
fn jitter_beyond_tolerance_splits_into_separate_rows() {
    let rects = vec![rect(0.0, 0.0), rect(100.0, 50.0)];
    let positions = infer_grid(&rects, 10.0);
    assert_ne!(positions[0].row, positions[1].row);
}

#[test]
fn distance_between_corners_of_a_unit_grid_is_diagonal() {
    let d = distance((0.0, 0.0), (1.0, 1.0));
    assert!((d - std::f64::consts::SQRT_2).abs() < 1e-9);
}
