//! Stagger Coordinator (C15): turns a slot's elements into either a
//! per-element timed delay (`LINEAR`/`GRID`) or a per-element progress
//! fan-out from a scrubbed global scroll progress.

use fame_core::FameError;
use fame_dom::Rect;
use serde::{Deserialize, Serialize};

use crate::direction::{linear_rank, StaggerDirection};
use crate::grid::{distance, infer_grid};

/// Tolerance used to bucket bounding-rect edges into the same grid row/col.
/// Not part of `FameConfig` because it's specific to this one algorithm and
/// has no other reader; a constant here keeps it next to the code that
/// interprets it.
pub const DEFAULT_GRID_BUCKET_TOLERANCE_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaggerStrategy {
    Linear,
    Grid,
    /// Per-element progress derived from a scrubbed global scroll progress
    /// rather than a wall-clock delay (§4.15's "scrubbed scroll").
    ScrubbedScroll,
}

/// Authoring config for a slot's stagger (§3's `StaggerConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaggerConfig {
    pub enabled: bool,
    pub strategy: StaggerStrategy,
    pub delay_between_s: f32,
    pub direction: StaggerDirection,
    pub scrub_window_pct: Option<u32>,
}

impl StaggerConfig {
    pub fn new(strategy: StaggerStrategy, delay_between_s: f32, direction: StaggerDirection) -> Result<Self, FameError> {
        if !delay_between_s.is_finite() || delay_between_s < 0.0 {
            return Err(FameError::InvalidStaggerDelay(delay_between_s));
        }
        Ok(Self { enabled: true, strategy, delay_between_s, direction, scrub_window_pct: None })
    }

    /// Sets the scrub window (`1..=100`, a percentage of the global
    /// progress range each element's own window spans).
    pub fn with_scrub_window_pct(mut self, scrub_window_pct: u32) -> Result<Self, FameError> {
        if !(1..=100).contains(&scrub_window_pct) {
            return Err(FameError::ScrubWindowOutOfRange(scrub_window_pct));
        }
        self.scrub_window_pct = Some(scrub_window_pct);
        Ok(self)
    }
}

#[derive(Clone, Copy)]
pub struct StaggerCoordinator {
    grid_tolerance_px: f64,
}

impl Default for StaggerCoordinator {
    fn default() -> Self {
        Self { grid_tolerance_px: DEFAULT_GRID_BUCKET_TOLERANCE_PX }
    }
}

impl StaggerCoordinator {
    pub fn new(grid_tolerance_px: f64) -> Self {
        Self { grid_tolerance_px }
    }

    /// Per-element delay in seconds for a `LINEAR` or `GRID` timed stagger.
    /// `rects` is read only for `GRID` (bucketing needs bounding rects);
    /// `LINEAR` orders purely by array index.
    pub fn delays(&self, config: &StaggerConfig, rects: &[Rect]) -> Vec<f64> {
        match config.strategy {
            StaggerStrategy::Linear => {
                let n = rects.len();
                (0..n).map(|i| linear_rank(config.direction, i, n) * config.delay_between_s as f64).collect()
            }
            StaggerStrategy::Grid => self.grid_delays(config, rects),
            StaggerStrategy::ScrubbedScroll => {
                log::warn!("StaggerCoordinator::delays called on a ScrubbedScroll config; use scrub_progress instead");
                vec![0.0; rects.len()]
            }
        }
    }

    fn grid_delays(&self, config: &StaggerConfig, rects: &[Rect]) -> Vec<f64> {
        let positions = infer_grid(rects, self.grid_tolerance_px);
        let max_row = positions.iter().map(|p| p.row).max().unwrap_or(0) as f64;
        let max_col = positions.iter().map(|p| p.col).max().unwrap_or(0) as f64;
        let center = (max_row / 2.0, max_col / 2.0);

        let raw_distances: Vec<f64> = match config.direction {
            StaggerDirection::TopLeftToBottomRight => {
                positions.iter().map(|p| distance(p.as_point(), (0.0, 0.0))).collect()
            }
            StaggerDirection::TopRightToBottomLeft => {
                positions.iter().map(|p| distance(p.as_point(), (0.0, max_col))).collect()
            }
            StaggerDirection::BottomLeftToTopRight => {
                positions.iter().map(|p| distance(p.as_point(), (max_row, 0.0))).collect()
            }
            StaggerDirection::BottomRightToTopLeft => {
                positions.iter().map(|p| distance(p.as_point(), (max_row, max_col))).collect()
            }
            StaggerDirection::CenterOut => positions.iter().map(|p| distance(p.as_point(), center)).collect(),
            StaggerDirection::EdgesIn => {
                // every corner of a rectangle is equidistant from its center,
                // so any one corner gives the max distance to subtract from.
                let max_center_distance = distance((0.0, 0.0), center);
                positions.iter().map(|p| max_center_distance - distance(p.as_point(), center)).collect()
            }
            StaggerDirection::FirstToLast | StaggerDirection::LastToFirst => {
                // reading order (row-major), ascending or descending.
                let mut order: Vec<usize> = (0..positions.len()).collect();
                order.sort_by_key(|&i| (positions[i].row, positions[i].col));
                let mut rank = vec![0.0; positions.len()];
                for (r, &idx) in order.iter().enumerate() {
                    rank[idx] = if config.direction == StaggerDirection::LastToFirst {
                        (positions.len().saturating_sub(1) - r) as f64
                    } else {
                        r as f64
                    };
                }
                rank
            }
        };

        raw_distances.into_iter().map(|d| d * config.delay_between_s as f64).collect()
    }

    /// Per-element progress for a scrubbed-scroll stagger (§4.15):
    /// `offset_i = (rank_i / max(n-1,1)) × (1 − w)`, `p_i = clamp01((p −
    /// offset_i) / w)`. `direction` reversal (`LAST_TO_FIRST`) is handled by
    /// [`linear_rank`] itself; `w = 1` naturally yields `offset_i = 0` for
    /// every element, so every element shares the global progress with no
    /// special case needed.
    pub fn scrub_progress(&self, config: &StaggerConfig, global_progress: f64, n: usize) -> Vec<f64> {
        let w = config.scrub_window_pct.unwrap_or(100) as f64 / 100.0;
        let w = if w <= 0.0 { 1.0 } else { w };
        let denom = (n.saturating_sub(1)).max(1) as f64;
        (0..n)
            .map(|i| {
                let rank = linear_rank(config.direction, i, n);
                let offset = (rank / denom) * (1.0 - w);
                ((global_progress - offset) / w).clamp(0.0, 1.0)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
