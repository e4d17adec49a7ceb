//! Behavior Coordinator (C12): routes a fired trigger to one of three
//! interrupt policies, then hands off to the Decision Engine (C11). Owns no
//! DOM or player state directly — `fame-engine` applies the returned
//! [`BehaviorDecision`] to the actual `TimelinePlayer` and Stagger
//! Coordinator, keeping this crate ignorant of both (neither is reachable
//! from here without inverting the crate graph).

use fame_core::Owned;
use fame_player::{AnimationBehavior, ReverseMode};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use fame_state::{AnimationStateStore, AnimationStatus};

use crate::decision::{decide, BehaviorDecision};

/// Per-slot interrupt policy (§3's `slot.interruptBehavior`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterruptBehavior {
    Immediate,
    Block,
    QueueLatest,
}

/// A trigger's request, not yet resolved against the slot's current
/// progress. Stored verbatim when `QUEUE_LATEST` defers it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingIntent {
    pub behavior: AnimationBehavior,
    pub override_state: bool,
    pub override_start_progress: f64,
    pub reverse_mode: ReverseMode,
}

/// Routes fired triggers through a slot's interrupt policy and the Decision
/// Engine. One coordinator is shared by every slot; state is keyed by slot
/// id, mirroring `AnimationStateStore`'s own per-slot map.
#[derive(Clone)]
pub struct BehaviorCoordinator {
    state: AnimationStateStore,
    queued: Owned<FxHashMap<String, PendingIntent>>,
}

impl BehaviorCoordinator {
    pub fn new(state: AnimationStateStore) -> Self {
        Self { state, queued: Owned::new(FxHashMap::default()) }
    }

    pub fn state(&self) -> &AnimationStateStore {
        &self.state
    }

    /// Dispatches a freshly-fired trigger's `intent` for `slot_id` under
    /// `interrupt`. Returns `Some(decision)` when the caller should execute
    /// it now (via the player and the Stagger Coordinator); `None` when the
    /// trigger was dropped (`BLOCK` while running), queued (`QUEUE_LATEST`
    /// while running), or the Decision Engine itself decided to skip.
    pub fn dispatch(&self, slot_id: &str, interrupt: InterruptBehavior, intent: PendingIntent) -> Option<BehaviorDecision> {
        match interrupt {
            InterruptBehavior::Immediate => {
                self.state.cancel_active_animations(slot_id);
                self.queued.update(|m| m.remove(slot_id));
                self.decide_and_mark(slot_id, intent)
            }
            InterruptBehavior::Block => {
                if self.state.status(slot_id) == AnimationStatus::Running {
                    None
                } else {
                    self.decide_and_mark(slot_id, intent)
                }
            }
            InterruptBehavior::QueueLatest => {
                if self.state.status(slot_id) == AnimationStatus::Running {
                    self.queued.update(|m| m.insert(slot_id.to_string(), intent));
                    None
                } else {
                    self.decide_and_mark(slot_id, intent)
                }
            }
        }
    }

    /// Called by `fame-engine` when a slot's animation completes
    /// (status transitions to `COMPLETED`). If a `QUEUE_LATEST` trigger was
    /// deferred while this slot was running, resolves and returns it now.
    pub fn execute_queued_intent_if_exists(&self, slot_id: &str) -> Option<BehaviorDecision> {
        let intent = self.queued.update(|m| m.remove(slot_id))?;
        self.decide_and_mark(slot_id, intent)
    }

    fn decide_and_mark(&self, slot_id: &str, intent: PendingIntent) -> Option<BehaviorDecision> {
        let current = self.state.progress(slot_id);
        let decision = decide(
            intent.behavior,
            current,
            intent.override_state,
            intent.override_start_progress,
            intent.reverse_mode,
        )?;
        self.state.update_target(slot_id, decision.target_progress);
        self.state.update_progress(slot_id, decision.effective_start, AnimationStatus::Running);
        Some(decision)
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
