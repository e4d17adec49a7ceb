use super::*;

#[test]
fn first_to_last_is_index_order() {
    for i in 0..5 {
        assert_eq!(linear_rank(StaggerDirection::FirstToLast, i, 5), i as f64);
    }
}

#[test]
fn last_to_first_reverses_index_order() {
    assert_eq!(linear_rank(StaggerDirection::LastToFirst, 0, 5), 4.0);
    assert_eq!(linear_rank(StaggerDirection::LastToFirst, 4, 5), 0.0);
}

#[test]
fn center_out_ranks_the_middle_element_lowest() {
    // 5 elements, center index 2.
    let ranks: Vec<f64> = (0..5).map(|i| linear_rank(StaggerDirection::CenterOut, i, 5)).collect();
    assert_eq!(ranks[2], 0.0);
    assert_eq!(ranks[0], 4.0);
    assert_eq!(ranks[4], 4.0);
    assert!(ranks[1] < ranks[0]);
}

#[test]
fn edges_in_is_the_mirror_of_center_out() {
    for i in 0..5 {
        let center_out = linear_rank(StaggerDirection::CenterOut, i, 5);
        let edges_in = linear_rank(StaggerDirection::EdgesIn, i, 5);
        assert!((center_out + edges_in - 4.0).abs() < 1e-9);
    }
}

#[test]
fn single_element_always_ranks_zero() {
    for direction in [StaggerDirection::FirstToLast, StaggerDirection::LastToFirst, StaggerDirection::CenterOut, StaggerDirection::EdgesIn] {
        assert_eq!(linear_rank(direction, 0, 1), 0.0);
    }
}

#[test]
fn grid_corner_direction_on_a_linear_rank_falls_back_to_first_to_last() {
    assert_eq!(linear_rank(StaggerDirection::TopLeftToBottomRight, 2, 5), 2.0);
}
