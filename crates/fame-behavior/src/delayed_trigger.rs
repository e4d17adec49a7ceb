//! Delayed Trigger Manager (C14): gates whether a fired trigger actually
//! executes, per slot, either by a simple skip-count or by a cyclic
//! boolean pattern.

use fame_core::Owned;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Authoring config for a `DELAYED_TRIGGER` behavior (§4.14).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedTriggerMode {
    /// Executes on the `(skip_count + 1)`-th trigger, then resets.
    Simple { skip_count: u32 },
    /// Parses `pattern` (comma- or space-separated) into a cyclic 0/1
    /// sequence; each trigger emits the next value and advances the cursor.
    Pattern { pattern: String },
}

#[derive(Default)]
struct SlotTriggerState {
    trigger_count: u32,
    pattern_position: usize,
}

/// Per-slot gating state for [`DelayedTriggerMode`]. Shared (cloned cheaply)
/// by every slot that has a `DELAYED_TRIGGER` behavior configured.
#[derive(Clone, Default)]
pub struct DelayedTriggerManager {
    slots: Owned<FxHashMap<String, SlotTriggerState>>,
}

impl DelayedTriggerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a trigger firing for `slot_id` under `mode` and reports
    /// whether it should actually execute.
    pub fn should_execute(&self, slot_id: &str, mode: &DelayedTriggerMode) -> bool {
        match mode {
            DelayedTriggerMode::Simple { skip_count } => self.slots.update(|m| {
                let slot = m.entry(slot_id.to_string()).or_default();
                slot.trigger_count += 1;
                if slot.trigger_count > *skip_count {
                    slot.trigger_count = 0;
                    true
                } else {
                    false
                }
            }),
            DelayedTriggerMode::Pattern { pattern } => {
                let parsed = parse_pattern(pattern);
                self.slots.update(|m| {
                    let slot = m.entry(slot_id.to_string()).or_default();
                    let idx = slot.pattern_position % parsed.len();
                    slot.pattern_position = (idx + 1) % parsed.len();
                    parsed[idx]
                })
            }
        }
    }

    /// Drops a slot's gating state entirely (on unbind).
    pub fn teardown(&self, slot_id: &str) {
        self.slots.update(|m| m.remove(slot_id));
    }
}

/// Parses a comma- or whitespace-separated token list into a 0/1 sequence.
/// A token that isn't exactly `"1"` counts as `0`, per spec (invalid tokens
/// default to off rather than being rejected). An empty or all-whitespace
/// pattern falls back to `[0, 0, 1]`.
fn parse_pattern(raw: &str) -> Vec<bool> {
    let tokens: Vec<&str> = raw.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return vec![false, false, true];
    }
    tokens.iter().map(|t| *t == "1").collect()
}

#[cfg(test)]
#[path = "tests/delayed_trigger_tests.rs"]
mod tests;
