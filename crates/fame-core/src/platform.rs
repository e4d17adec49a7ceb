//! Host platform abstraction traits.
//!
//! FAME's timeline math, behavior state machine, and stagger/scroll
//! coordination never touch a clock or a frame callback directly. They go
//! through these two traits instead, so the whole engine can be driven by a
//! deterministic fake in tests and by real `requestAnimationFrame`/`Date.now`
//! on `wasm32-unknown-unknown`.

use std::rc::Rc;

/// Unique id for a registered frame callback, opaque to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameCallbackId(pub u64);

/// Unique id for a registered timer (delay) callback, opaque to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerCallbackId(pub u64);

/// Schedules per-frame work for the runtime.
///
/// A single implementation is shared by every FAME component that needs a
/// frame tick (the Timeline Player, the Unified Scroll Manager, stagger
/// timeouts). On wasm this wraps `window.requestAnimationFrame`; in tests it
/// is driven manually by advancing a fake clock and invoking due callbacks.
pub trait FrameScheduler {
    /// Request a single callback on the next frame. The callback receives the
    /// frame timestamp in milliseconds (matching the DOMHighResTimeStamp the
    /// browser passes to a real rAF callback).
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> FrameCallbackId;

    /// Cancel a previously requested frame callback. A no-op if it already fired.
    fn cancel_frame(&self, id: FrameCallbackId);
}

/// Schedules delayed (non-frame-aligned) work: inter-cycle loop delays,
/// stagger timeouts, and the cursor-style blink-interval pattern.
pub trait TimerScheduler {
    /// Request a callback after `delay_ms` milliseconds.
    fn request_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerCallbackId;

    /// Cancel a previously requested timer callback.
    fn cancel_timer(&self, id: TimerCallbackId);
}

/// Provides the current time, used for cache TTL checks (C1's viewport
/// dimension cache, C16's boundary cache) that must not be bound to frame
/// cadence.
pub trait Clock {
    /// Milliseconds since an arbitrary but fixed epoch.
    fn now_millis(&self) -> f64;
}

/// A cheaply-cloned handle bundling the three platform services a FAME
/// component needs. Components take this explicitly rather than reaching for
/// a global, per the "ambient singletons are passed explicitly" guidance.
#[derive(Clone)]
pub struct RuntimeHandle {
    frames: Rc<dyn FrameScheduler>,
    timers: Rc<dyn TimerScheduler>,
    clock: Rc<dyn Clock>,
}

impl RuntimeHandle {
    pub fn new(
        frames: Rc<dyn FrameScheduler>,
        timers: Rc<dyn TimerScheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            frames,
            timers,
            clock,
        }
    }

    pub fn frames(&self) -> &Rc<dyn FrameScheduler> {
        &self.frames
    }

    pub fn timers(&self) -> &Rc<dyn TimerScheduler> {
        &self.timers
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    pub fn now_millis(&self) -> f64 {
        self.clock.now_millis()
    }
}
