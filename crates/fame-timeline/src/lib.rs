//! Property Timeline and Master Timeline (C3, C4): sorted/deduplicated
//! per-property keyframe sequences, composed into one master timeline whose
//! duration is the max over its children.

mod keyframe;
mod master;
mod timeline;

pub use keyframe::PropertyKeyframe;
pub use master::MasterTimeline;
pub use timeline::{PropertyInterpolator, PropertyTimeline};
