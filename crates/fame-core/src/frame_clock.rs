//! RAF-style frame scheduling, generalized from the donor `FrameClock` /
//! `FrameCallbackRegistration` / `NextFrame` trio to the `RuntimeHandle`
//! platform seam (see `platform.rs`) instead of a Composer-bound runtime.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::platform::{FrameCallbackId, RuntimeHandle};

/// A live registration for a single frame callback. Dropping it cancels the
/// callback, mirroring RAII cancellation used throughout this crate family.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    /// Cancel the callback explicitly. Equivalent to dropping the registration.
    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.frames().cancel_frame(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.frames().cancel_frame(id);
        }
    }
}

/// Requests a single frame callback, returning a cancellable registration.
pub fn with_frame_millis(
    runtime: &RuntimeHandle,
    callback: impl FnOnce(f64) + 'static,
) -> FrameCallbackRegistration {
    let id = runtime.frames().request_frame(Box::new(callback));
    FrameCallbackRegistration::new(runtime.clone(), id)
}

struct NextFrameState {
    registration: Option<FrameCallbackRegistration>,
    time: Option<f64>,
    waker: Option<Waker>,
}

/// A future that resolves with the next frame's timestamp (milliseconds).
/// Used by the Timeline Player to await the frame after the last sampled one
/// before resolving `playForward`/`playBackward`.
pub struct NextFrame {
    runtime: RuntimeHandle,
    state: Rc<RefCell<NextFrameState>>,
}

impl NextFrame {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            runtime,
            state: Rc::new(RefCell::new(NextFrameState {
                registration: None,
                time: None,
                waker: None,
            })),
        }
    }
}

impl Future for NextFrame {
    type Output = f64;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(time) = self.state.borrow().time {
            return Poll::Ready(time);
        }

        let mut state = self.state.borrow_mut();
        state.waker = Some(cx.waker().clone());
        if state.registration.is_none() {
            drop(state);
            let weak = Rc::downgrade(&self.state);
            let registration = with_frame_millis(&self.runtime, move |time| {
                if let Some(state) = weak.upgrade() {
                    let mut state = state.borrow_mut();
                    state.time = Some(time);
                    state.registration.take();
                    if let Some(waker) = state.waker.take() {
                        waker.wake();
                    }
                }
            });
            self.state.borrow_mut().registration = Some(registration);
        }

        Poll::Pending
    }
}
