//! Text-processing authoring config (§3's `AnimatedElementSelection.textProcessing`).

use serde::{Deserialize, Serialize};

/// Granularity the Text Splitter rebuilds a container's markup into. Reused
/// for `animate_by` since both draw from the same closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitType {
    Lines,
    Words,
    Characters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSplitConfig {
    pub enabled: bool,
    pub split_type: SplitType,
    /// Which rebuilt granularity becomes the animated-element set. May
    /// differ from `split_type` (e.g. `Characters` split, `Words` animated)
    /// when `split_type == Characters`, since that mode always produces a
    /// nested word→char tree and either level is addressable.
    pub animate_by: SplitType,
    pub mask_lines: bool,
    /// Authoring-time flag consulted by the host before calling the
    /// splitter at all when the environment probe (§6) reports `canvas` —
    /// text splitting is not repeated here because `fame-text` has no
    /// notion of `EnvironmentMode` (that lives in `fame-dom`/`fame-engine`).
    pub canvas_fallback: bool,
}

impl TextSplitConfig {
    pub fn new(split_type: SplitType) -> Self {
        Self { enabled: true, split_type, animate_by: split_type, mask_lines: false, canvas_fallback: true }
    }

    pub fn with_animate_by(mut self, animate_by: SplitType) -> Self {
        self.animate_by = animate_by;
        self
    }

    pub fn with_mask_lines(mut self, mask_lines: bool) -> Self {
        self.mask_lines = mask_lines;
        self
    }
}
