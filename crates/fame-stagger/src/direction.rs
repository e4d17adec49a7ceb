use serde::{Deserialize, Serialize};

/// Stagger ordering (§3's `StaggerConfig.direction`). The first four apply
/// to both `LINEAR` and `GRID` strategies (and to the scrubbed-scroll offset
/// mapping); the grid corners only make sense once elements have been
/// bucketed into rows/columns (`GRID` strategy only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaggerDirection {
    FirstToLast,
    LastToFirst,
    CenterOut,
    EdgesIn,
    TopLeftToBottomRight,
    TopRightToBottomLeft,
    BottomLeftToTopRight,
    BottomRightToTopLeft,
}

/// Returns a 1-D ordering rank for element `i` of `n`, normalized so the
/// ranks span `[0, n-1]` regardless of direction (ties are expected and
/// intentional for `CenterOut`/`EdgesIn` on symmetric positions). Used by
/// `LINEAR` timed stagger (scaled by `delayBetween_s`) and by the
/// scrubbed-scroll offset mapping (normalized by `max(n-1, 1)`).
///
/// The grid-corner directions aren't a 1-D ordering — callers configuring
/// those for a `LINEAR` or scrubbed slot fall back to `FirstToLast`.
pub fn linear_rank(direction: StaggerDirection, i: usize, n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let last = (n - 1) as f64;
    match direction {
        StaggerDirection::FirstToLast => i as f64,
        StaggerDirection::LastToFirst => last - i as f64,
        StaggerDirection::CenterOut => center_out_rank(i, n),
        StaggerDirection::EdgesIn => last - center_out_rank(i, n),
        StaggerDirection::TopLeftToBottomRight
        | StaggerDirection::TopRightToBottomLeft
        | StaggerDirection::BottomLeftToTopRight
        | StaggerDirection::BottomRightToTopLeft => {
            log::warn!("grid direction {direction:?} used on a non-grid stagger; falling back to FIRST_TO_LAST");
            i as f64
        }
    }
}

/// Distance from the center index, rescaled so its maximum (at either array
/// end) equals `n - 1` — the same scale `FirstToLast`/`LastToFirst` use, so
/// every direction's ranks are directly comparable.
fn center_out_rank(i: usize, n: usize) -> f64 {
    let last = (n - 1) as f64;
    let center = last / 2.0;
    let max_dist = center.max(f64::EPSILON);
    ((i as f64 - center).abs() / max_dist) * last
}

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod tests;
