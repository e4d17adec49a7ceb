//! Grid coordinate inference: tolerance-based row/column bucketing,
//! generalizing a `ScrollPositionResolver`-style tolerance-driven numeric
//! bucketing idiom from 1-D scroll-offset snapping to 2-D bounding-rect
//! bucketing.

use fame_dom::Rect;

/// An element's inferred `(row, col)` within the stagger grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

/// Buckets `rects` into rows and columns: elements whose top (or left) edges
/// fall within `tolerance_px` of each other, once sorted along that axis,
/// land in the same bucket. Returns one `GridPosition` per input rect, in
/// the same order.
pub fn infer_grid(rects: &[Rect], tolerance_px: f64) -> Vec<GridPosition> {
    let rows = bucket_axis(rects.iter().map(Rect::top).collect(), tolerance_px);
    let cols = bucket_axis(rects.iter().map(Rect::left).collect(), tolerance_px);
    rows.into_iter().zip(cols).map(|(row, col)| GridPosition { row, col }).collect()
}

/// Assigns a 0-based bucket index per input value (in original order),
/// grouping values within `tolerance_px` of their sorted neighbor into the
/// same bucket.
fn bucket_axis(values: Vec<f64>, tolerance_px: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(std::cmp::Ordering::Equal));

    let mut buckets = vec![0usize; values.len()];
    let mut current_bucket = 0usize;
    let mut bucket_start_value = None;
    for &idx in &order {
        let value = values[idx];
        if let Some(start) = bucket_start_value {
            if value - start > tolerance_px {
                current_bucket += 1;
                bucket_start_value = Some(value);
            }
        } else {
            bucket_start_value = Some(value);
        }
        buckets[idx] = current_bucket;
    }
    buckets
}

/// Euclidean distance (in grid-cell units) between two `(row, col)` points,
/// used to scale a per-element stagger delay against a direction's anchor
/// corner or center.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dr = a.0 - b.0;
    let dc = a.1 - b.1;
    (dr * dr + dc * dc).sqrt()
}

impl GridPosition {
    pub fn as_point(self) -> (f64, f64) {
        (self.row as f64, self.col as f64)
    }
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
