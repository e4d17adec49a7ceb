use fame_core::FameError;
use fame_dom::Rect;

use super::*;

fn rect(x: f64, y: f64) -> Rect {
    Rect { x, y, width: 50.0, height: 20.0 }
}

#[test]
fn stagger_config_rejects_a_negative_delay() {
    let err = StaggerConfig::new(StaggerStrategy::Linear, -0.1, StaggerDirection::FirstToLast).unwrap_err();
    assert_eq!(err, FameError::InvalidStaggerDelay(-0.1));
}

#[test]
fn stagger_config_rejects_scrub_window_out_of_range() {
    let config = StaggerConfig::new(StaggerStrategy::ScrubbedScroll, 0.0, StaggerDirection::FirstToLast).unwrap();
    let err = config.with_scrub_window_pct(0).unwrap_err();
    assert_eq!(err, FameError::ScrubWindowOutOfRange(0));
    let err = config.with_scrub_window_pct(101).unwrap_err();
    assert_eq!(err, FameError::ScrubWindowOutOfRange(101));
}

#[test]
fn linear_delays_scale_rank_by_delay_between() {
    let config = StaggerConfig::new(StaggerStrategy::Linear, 0.2, StaggerDirection::FirstToLast).unwrap();
    let coordinator = StaggerCoordinator::default();
    let rects = vec![rect(0.0, 0.0); 5];
    let delays = coordinator.delays(&config, &rects);
    assert_eq!(delays, vec![0.0, 0.2, 0.4, 0.6000000000000001, 0.8]);
}

#[test]
fn grid_delays_top_left_to_bottom_right_increase_with_distance_from_origin() {
    let config = StaggerConfig::new(StaggerStrategy::Grid, 1.0, StaggerDirection::TopLeftToBottomRight).unwrap();
    let coordinator = StaggerCoordinator::default();
    // 2x2 grid, 100px spacing.
    let rects = vec![rect(0.0, 0.0), rect(100.0, 0.0), rect(0.0, 100.0), rect(100.0, 100.0)];
    let delays = coordinator.delays(&config, &rects);
    assert_eq!(delays[0], 0.0);
    assert!(delays[1] > 0.0);
    assert!(delays[2] > 0.0);
    assert!((delays[3] - delays[1]) > 0.0 || (delays[3] - delays[2]) > 0.0);
    // the bottom-right corner is farthest from the anchor.
    assert!(delays[3] > delays[1]);
    assert!(delays[3] > delays[2]);
}

#[test]
fn grid_delays_center_out_ranks_the_middle_lowest() {
    let config = StaggerConfig::new(StaggerStrategy::Grid, 1.0, StaggerDirection::CenterOut).unwrap();
    let coordinator = StaggerCoordinator::default();
    // 3x3 grid, 100px spacing - center cell at (100,100).
    let mut rects = Vec::new();
    for row in 0..3 {
        for col in 0..3 {
            rects.push(rect(col as f64 * 100.0, row as f64 * 100.0));
        }
    }
    let delays = coordinator.delays(&config, &rects);
    let center_delay = delays[4]; // row 1, col 1
    for (i, &d) in delays.iter().enumerate() {
        if i != 4 {
            assert!(d > center_delay, "corner/edge cell {i} should stagger later than the center");
        }
    }
}

#[test]
fn scrub_progress_matches_the_worked_example() {
    // 4 elements, scrubWindow 0.5, FIRST_TO_LAST, global progress 0.5.
    let config = StaggerConfig::new(StaggerStrategy::ScrubbedScroll, 0.0, StaggerDirection::FirstToLast)
        .unwrap()
        .with_scrub_window_pct(50)
        .unwrap();
    let coordinator = StaggerCoordinator::default();
    let progress = coordinator.scrub_progress(&config, 0.5, 4);
    let expected = vec![1.0, 0.6666666666666667, 0.33333333333333337, 0.0];
    for (p, e) in progress.iter().zip(expected.iter()) {
        assert!((p - e).abs() < 1e-9, "{p} vs {e}");
    }
}

#[test]
fn scrub_progress_at_global_zero_and_one_is_uniform() {
    let config = StaggerConfig::new(StaggerStrategy::ScrubbedScroll, 0.0, StaggerDirection::FirstToLast)
        .unwrap()
        .with_scrub_window_pct(50)
        .unwrap();
    let coordinator = StaggerCoordinator::default();
    assert_eq!(coordinator.scrub_progress(&config, 0.0, 4), vec![0.0, 0.0, 0.0, 0.0]);
    assert_eq!(coordinator.scrub_progress(&config, 1.0, 4), vec![1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn scrub_window_of_one_hundred_percent_shares_global_progress() {
    let config = StaggerConfig::new(StaggerStrategy::ScrubbedScroll, 0.0, StaggerDirection::FirstToLast)
        .unwrap()
        .with_scrub_window_pct(100)
        .unwrap();
    let coordinator = StaggerCoordinator::default();
    let progress = coordinator.scrub_progress(&config, 0.37, 5);
    for p in progress {
        assert!((p - 0.37).abs() < 1e-9);
    }
}

#[test]
fn last_to_first_reverses_the_scrub_offset_mapping() {
    let config = StaggerConfig::new(StaggerStrategy::ScrubbedScroll, 0.0, StaggerDirection::LastToFirst)
        .unwrap()
        .with_scrub_window_pct(50)
        .unwrap();
    let coordinator = StaggerCoordinator::default();
    let progress = coordinator.scrub_progress(&config, 0.5, 4);
    let expected = vec![0.0, 0.33333333333333337, 0.6666666666666667, 1.0];
    for (p, e) in progress.iter().zip(expected.iter()) {
        assert!((p - e).abs() < 1e-9);
    }
}
