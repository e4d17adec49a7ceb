//! A deterministic, manually-advanced stand-in for `fame-core`'s platform
//! traits. Every FAME crate's test suite drives frame/timer callbacks by
//! calling `advance_frame`/`advance_millis` explicitly rather than relying
//! on a real `requestAnimationFrame`/`setTimeout`, so tests are
//! reproducible and don't sleep.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fame_core::platform::{Clock, FrameCallbackId, FrameScheduler, RuntimeHandle, TimerCallbackId, TimerScheduler};

struct ManualRuntimeState {
    now_ms: Cell<f64>,
    next_frame_id: Cell<u64>,
    next_timer_id: Cell<u64>,
    frame_callbacks: RefCell<Vec<(FrameCallbackId, Option<Box<dyn FnOnce(f64)>>)>>,
    timers: RefCell<Vec<(TimerCallbackId, f64, Option<Box<dyn FnOnce()>>)>>,
}

impl FrameScheduler for ManualRuntimeState {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> FrameCallbackId {
        let id = FrameCallbackId(self.next_frame_id.get());
        self.next_frame_id.set(id.0 + 1);
        self.frame_callbacks.borrow_mut().push((id, Some(callback)));
        id
    }

    fn cancel_frame(&self, id: FrameCallbackId) {
        if let Some(entry) = self.frame_callbacks.borrow_mut().iter_mut().find(|(i, _)| *i == id) {
            entry.1 = None;
        }
    }
}

impl TimerScheduler for ManualRuntimeState {
    fn request_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerCallbackId {
        let id = TimerCallbackId(self.next_timer_id.get());
        self.next_timer_id.set(id.0 + 1);
        let fire_at = self.now_ms.get() + delay_ms as f64;
        self.timers.borrow_mut().push((id, fire_at, Some(callback)));
        id
    }

    fn cancel_timer(&self, id: TimerCallbackId) {
        if let Some(entry) = self.timers.borrow_mut().iter_mut().find(|(i, _, _)| *i == id) {
            entry.2 = None;
        }
    }
}

impl Clock for ManualRuntimeState {
    fn now_millis(&self) -> f64 {
        self.now_ms.get()
    }
}

/// Owns the manual clock state and hands out `RuntimeHandle`s that share it.
pub struct ManualRuntime {
    state: Rc<ManualRuntimeState>,
}

impl Default for ManualRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualRuntime {
    pub fn new() -> Self {
        Self {
            state: Rc::new(ManualRuntimeState {
                now_ms: Cell::new(0.0),
                next_frame_id: Cell::new(0),
                next_timer_id: Cell::new(0),
                frame_callbacks: RefCell::new(Vec::new()),
                timers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle::new(self.state.clone(), self.state.clone(), self.state.clone())
    }

    pub fn now_millis(&self) -> f64 {
        self.state.now_ms.get()
    }

    /// Fires every frame callback requested so far with `frame_time_ms`,
    /// matching real rAF semantics: callbacks scheduled *during* this batch
    /// (a player re-requesting the next frame) land in the next batch, not
    /// this one.
    pub fn advance_frame(&self, frame_time_ms: f64) {
        self.state.now_ms.set(frame_time_ms);
        let batch = std::mem::take(&mut *self.state.frame_callbacks.borrow_mut());
        for (_, callback) in batch {
            if let Some(callback) = callback {
                callback(frame_time_ms);
            }
        }
    }

    /// Advances the clock by `delta_ms` and fires every timer whose
    /// deadline has passed, in the order they were scheduled.
    pub fn advance_millis(&self, delta_ms: f64) {
        let target = self.state.now_ms.get() + delta_ms;
        self.state.now_ms.set(target);
        loop {
            let due_index = self
                .state
                .timers
                .borrow()
                .iter()
                .position(|(_, fire_at, cb)| cb.is_some() && *fire_at <= target);
            let Some(index) = due_index else { break };
            let (_, _, callback) = self.state.timers.borrow_mut().remove(index);
            if let Some(callback) = callback {
                callback();
            }
        }
    }

    pub fn pending_frame_count(&self) -> usize {
        self.state.frame_callbacks.borrow().iter().filter(|(_, cb)| cb.is_some()).count()
    }

    pub fn pending_timer_count(&self) -> usize {
        self.state.timers.borrow().iter().filter(|(_, _, cb)| cb.is_some()).count()
    }
}
