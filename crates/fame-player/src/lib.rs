//! Timeline Player (C5): plays one `fame-timeline::MasterTimeline` on one
//! element at a time, forward, backward, or by instantaneous seek.

pub mod behavior;
pub mod player;

pub use behavior::{AnimationBehavior, ReverseMode};
pub use player::{FrameSample, TimelinePlayer};
