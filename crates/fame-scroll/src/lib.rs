//! Scroll Progress Tracker, Unified Scroll Manager, and Scroll Direction
//! Detector (C16-C18): everything FAME needs to turn window scroll events
//! into per-slot progress, with exactly one shared `scroll` listener doing
//! the RAF-batched, priority-ordered dispatch work (C17), and a second,
//! deliberately separate listener for direction-change detection (C18).

mod boundary;
mod direction;
mod manager;

pub use boundary::{Length, ScrollBoundaries, ScrollBoundary, ScrollProgressTracker};
pub use direction::{ScrollDirection, ScrollDirectionDetector};
pub use manager::{ScrollPriority, UnifiedScrollManager};
