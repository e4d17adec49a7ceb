//! `FameConfig`: the handful of global knobs the data model implies but
//! never names as a type (§3's "ambient singletons are passed explicitly"
//! guidance — every component that needs one of these takes it as a
//! constructor argument rather than reading a global).

use serde::{Deserialize, Serialize};

/// Global tuning knobs shared across the FAME crates. Each field documents
/// which component reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FameConfig {
    /// C17 Unified Scroll Manager per-frame work budget, in milliseconds.
    pub scroll_frame_budget_ms: f64,
    /// C16 boundary/dimension cache time-to-live, in milliseconds.
    pub resize_cache_ttl_ms: f64,
    /// C9 Text Splitter line-grouping tolerance used on a forced re-split.
    pub forced_split_tolerance_px: f64,
    /// C9 Text Splitter line-grouping tolerance used on an ordinary re-split.
    pub normal_split_tolerance_px: f64,
}

impl Default for FameConfig {
    fn default() -> Self {
        Self {
            scroll_frame_budget_ms: 8.0,
            resize_cache_ttl_ms: 2000.0,
            forced_split_tolerance_px: 2.0,
            normal_split_tolerance_px: 5.0,
        }
    }
}
