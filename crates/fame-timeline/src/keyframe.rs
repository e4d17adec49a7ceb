use fame_easing::EasingName;
use fame_style::PropertyValue;
use serde::{Deserialize, Serialize};

/// One authored keyframe within a `PropertyTimeline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyKeyframe {
    pub time_s: f64,
    pub value: PropertyValue,
    /// Easing applied when arriving *at* this keyframe from the previous one.
    pub easing: Option<EasingName>,
    /// Opaque host-defined metadata, carried through untouched.
    pub metadata: Option<String>,
}

impl PropertyKeyframe {
    pub fn new(time_s: f64, value: PropertyValue) -> Self {
        Self { time_s, value, easing: None, metadata: None }
    }

    pub fn with_easing(mut self, easing: EasingName) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }
}
