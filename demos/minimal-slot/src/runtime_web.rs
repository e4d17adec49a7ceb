//! A `window.requestAnimationFrame`/`setTimeout`/`performance.now`-backed
//! [`FrameScheduler`]/[`TimerScheduler`]/[`Clock`]. None of the `fame-*`
//! crates ship one of these themselves — `fame-dom`'s `web` feature only
//! covers the `Document`/`Element` half of the host-platform split (C21);
//! the frame/timer half (C1's `RuntimeScheduler`/`Clock` split) is this
//! crate's to provide, the same way a host app provides its own event loop
//! around the engine.

use std::cell::RefCell;
use std::rc::Rc;

use fame_core::{Clock, FrameCallbackId, FrameScheduler, RuntimeHandle, TimerCallbackId, TimerScheduler};
use rustc_hash::FxHashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

struct Inner {
    window: web_sys::Window,
    next_frame_id: RefCell<u64>,
    next_timer_id: RefCell<u64>,
    // Keeps each pending callback's raf/timeout handle and closure alive
    // until it either fires or is cancelled.
    pending_frames: RefCell<FxHashMap<u64, (i32, Closure<dyn FnMut(f64)>)>>,
    pending_timers: RefCell<FxHashMap<u64, (i32, Closure<dyn FnMut()>)>>,
}

/// Schedules FAME's frame/timer work against a real browser event loop.
/// One instance is shared by every component a [`demo::bind`] call wires up.
#[derive(Clone)]
pub struct WebRuntime {
    inner: Rc<Inner>,
}

impl WebRuntime {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            inner: Rc::new(Inner {
                window,
                next_frame_id: RefCell::new(0),
                next_timer_id: RefCell::new(0),
                pending_frames: RefCell::new(FxHashMap::default()),
                pending_timers: RefCell::new(FxHashMap::default()),
            }),
        }
    }

    /// Bundles this runtime into the three-trait handle every FAME component
    /// takes, per the "ambient singletons are passed explicitly" split.
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle::new(Rc::new(self.clone()), Rc::new(self.clone()), Rc::new(self.clone()))
    }
}

impl FrameScheduler for WebRuntime {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> FrameCallbackId {
        let mut counter = self.inner.next_frame_id.borrow_mut();
        *counter += 1;
        let id = *counter;
        drop(counter);

        let inner = self.inner.clone();
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            inner.pending_frames.borrow_mut().remove(&id);
            if let Some(callback) = callback.take() {
                callback(timestamp);
            }
        }) as Box<dyn FnMut(f64)>);

        let handle = self
            .inner
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .unwrap_or(-1);
        self.inner.pending_frames.borrow_mut().insert(id, (handle, closure));
        FrameCallbackId(id)
    }

    fn cancel_frame(&self, id: FrameCallbackId) {
        if let Some((handle, _closure)) = self.inner.pending_frames.borrow_mut().remove(&id.0) {
            let _ = self.inner.window.cancel_animation_frame(handle);
        }
    }
}

impl TimerScheduler for WebRuntime {
    fn request_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerCallbackId {
        let mut counter = self.inner.next_timer_id.borrow_mut();
        *counter += 1;
        let id = *counter;
        drop(counter);

        let inner = self.inner.clone();
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            inner.pending_timers.borrow_mut().remove(&id);
            if let Some(callback) = callback.take() {
                callback();
            }
        }) as Box<dyn FnMut()>);

        let handle = self
            .inner
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), delay_ms as i32)
            .unwrap_or(-1);
        self.inner.pending_timers.borrow_mut().insert(id, (handle, closure));
        TimerCallbackId(id)
    }

    fn cancel_timer(&self, id: TimerCallbackId) {
        if let Some((handle, _closure)) = self.inner.pending_timers.borrow_mut().remove(&id.0) {
            self.inner.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Clock for WebRuntime {
    fn now_millis(&self) -> f64 {
        self.inner
            .window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or(0.0)
    }
}
