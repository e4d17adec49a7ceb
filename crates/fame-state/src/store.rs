//! Animation State Store (C10): per-slot progress, status, active-animation
//! cleanup, and completion waiters, generalizing `fame-core::Owned<T>`'s
//! single-threaded shared-cell idiom to a map keyed by slot id.
//!
//! `AnimationState` is runtime-only (§3: never serialized) — it never
//! leaves this crate as a type the property-control UI would round-trip,
//! so it carries no `serde` derive.
//!
//! Note on C11 ("`decideBehavior` delegates to C11"): that delegation lives
//! in `fame-behavior`'s Behavior Coordinator (C12), not here, because the
//! crate graph is leaves-first and C11/C12 both need to *read* this store's
//! progress before deciding anything — putting the call here would make
//! `fame-state` depend upward on `fame-behavior`, inverting the graph.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use fame_core::Owned;
use rustc_hash::FxHashMap;

/// A slot's lifecycle status (§3's `AnimationState.status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl AnimationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AnimationStatus::Completed | AnimationStatus::Cancelled)
    }
}

#[derive(Default)]
struct SlotState {
    progress: f64,
    target_progress: f64,
    status: AnimationStatus,
    cleanups: Vec<Box<dyn FnOnce()>>,
    waiters: Vec<Waker>,
}

/// Per-slot-id animation state. Cheaply cloned — every clone shares the
/// same underlying map, matching the rest of FAME's single-threaded
/// `Rc`-shared-ownership idiom (§5: "never `Arc`/`Mutex`").
///
/// Callers key entries by slot id, or by `"{slot_id}#{element_index}"` for
/// the per-element state the resolved Open Question in §9 calls for
/// (individual-mode scroll triggers get one entry per matched element).
#[derive(Clone)]
pub struct AnimationStateStore {
    slots: Owned<FxHashMap<String, SlotState>>,
}

impl Default for AnimationStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationStateStore {
    pub fn new() -> Self {
        Self { slots: Owned::new(FxHashMap::default()) }
    }

    pub fn progress(&self, id: &str) -> f64 {
        self.slots.with(|m| m.get(id).map(|s| s.progress).unwrap_or(0.0))
    }

    pub fn target_progress(&self, id: &str) -> f64 {
        self.slots.with(|m| m.get(id).map(|s| s.target_progress).unwrap_or(0.0))
    }

    pub fn status(&self, id: &str) -> AnimationStatus {
        self.slots.with(|m| m.get(id).map(|s| s.status).unwrap_or_default())
    }

    pub fn update_target(&self, id: &str, target: f64) {
        let target = target.clamp(0.0, 1.0);
        self.slots.update(|m| m.entry(id.to_string()).or_default().target_progress = target);
    }

    /// Updates `progress` (clamped to `[0,1]`) and `status`. Does not wake
    /// completion waiters by itself — per-frame progress updates are hot
    /// and most of them are not terminal; `complete`/`cancel_active_animations`
    /// are the transitions that wake waiters.
    pub fn update_progress(&self, id: &str, progress: f64, status: AnimationStatus) {
        let progress = progress.clamp(0.0, 1.0);
        self.slots.update(|m| {
            let slot = m.entry(id.to_string()).or_default();
            slot.progress = progress;
            slot.status = status;
        });
    }

    /// Registers a cleanup invoked when this slot is next cancelled or torn
    /// down (a RAF registration cancel, a stagger timeout cancel, a scroll
    /// deregistration — whatever the caller scheduled for this run).
    pub fn register_cleanup(&self, id: &str, cleanup: impl FnOnce() + 'static) {
        self.slots.update(|m| m.entry(id.to_string()).or_default().cleanups.push(Box::new(cleanup)));
    }

    /// Invokes every registered cleanup for `id`, marks it `Cancelled`, and
    /// wakes completion waiters. `progress` is left exactly where it was
    /// last sampled (§5: "Cancellation never re-applies styles... the
    /// last-sampled frame is what the user sees").
    pub fn cancel_active_animations(&self, id: &str) {
        let cleanups = self.slots.update(|m| {
            let slot = m.entry(id.to_string()).or_default();
            slot.status = AnimationStatus::Cancelled;
            std::mem::take(&mut slot.cleanups)
        });
        for cleanup in cleanups {
            cleanup();
        }
        self.wake_waiters(id);
    }

    /// Marks `id` `Completed` at `final_progress` (the invariant:
    /// `progress === targetProgress` on natural completion) and wakes every
    /// completion waiter. A natural completion has nothing left running to
    /// clean up, so outstanding cleanups are simply dropped, not invoked.
    pub fn complete(&self, id: &str, final_progress: f64) {
        self.slots.update(|m| {
            let slot = m.entry(id.to_string()).or_default();
            slot.progress = final_progress.clamp(0.0, 1.0);
            slot.status = AnimationStatus::Completed;
            slot.cleanups.clear();
        });
        self.wake_waiters(id);
    }

    /// Tears a slot's state down entirely: runs any outstanding cleanups,
    /// wakes any waiters, and drops the entry (§3: "State entries are torn
    /// down when the slot's owning host unmounts").
    pub fn teardown(&self, id: &str) {
        let removed = self.slots.update(|m| m.remove(id));
        if let Some(mut slot) = removed {
            for cleanup in std::mem::take(&mut slot.cleanups) {
                cleanup();
            }
            for waker in slot.waiters.drain(..) {
                waker.wake();
            }
        }
    }

    fn wake_waiters(&self, id: &str) {
        let wakers =
            self.slots.update(|m| m.get_mut(id).map(|slot| std::mem::take(&mut slot.waiters)).unwrap_or_default());
        for waker in wakers {
            waker.wake();
        }
    }

    /// A future resolving to the slot's terminal status next time it
    /// becomes `Completed` or `Cancelled` — event-driven, per §4.10/§9
    /// ("no polling").
    pub fn wait_for_completion(&self, id: &str) -> CompletionWaiter {
        CompletionWaiter { store: self.clone(), id: id.to_string() }
    }
}

pub struct CompletionWaiter {
    store: AnimationStateStore,
    id: String,
}

impl Future for CompletionWaiter {
    type Output = AnimationStatus;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let status = self.store.status(&self.id);
        if status.is_terminal() {
            return Poll::Ready(status);
        }
        let id = self.id.clone();
        self.store.slots.update(|m| m.entry(id).or_default().waiters.push(cx.waker().clone()));
        Poll::Pending
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
