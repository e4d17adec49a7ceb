//! Delay futures, used by the Loop/Ping-Pong Runners (C13) for inter-cycle
//! delays and by the Delayed Trigger / Stagger timeout cancellation paths.
//! Mirrors `frame_clock::NextFrame`'s Waker-in-a-shared-cell shape, swapped
//! to a timer rather than a frame registration.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::platform::{RuntimeHandle, TimerCallbackId};

struct DelayState {
    id: Option<TimerCallbackId>,
    fired: bool,
    waker: Option<Waker>,
}

/// A cancellable handle to a pending delay. Dropping it cancels the timer.
pub struct DelayHandle {
    runtime: RuntimeHandle,
    state: Rc<RefCell<DelayState>>,
}

impl Drop for DelayHandle {
    fn drop(&mut self) {
        if let Some(id) = self.state.borrow_mut().id.take() {
            self.runtime.timers().cancel_timer(id);
        }
    }
}

/// A future that resolves after `delay_ms` milliseconds.
pub struct Delay {
    runtime: RuntimeHandle,
    delay_ms: u32,
    state: Rc<RefCell<DelayState>>,
    started: bool,
}

impl Delay {
    pub fn new(runtime: RuntimeHandle, delay_ms: u32) -> Self {
        Self {
            runtime,
            delay_ms,
            state: Rc::new(RefCell::new(DelayState {
                id: None,
                fired: false,
                waker: None,
            })),
            started: false,
        }
    }

    /// Returns a handle that, when dropped, cancels this delay even if the
    /// future itself has already been dropped or forgotten.
    pub fn handle(&self) -> DelayHandle {
        DelayHandle {
            runtime: self.runtime.clone(),
            state: self.state.clone(),
        }
    }
}

impl Future for Delay {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.state.borrow().fired {
            return Poll::Ready(());
        }

        self.state.borrow_mut().waker = Some(cx.waker().clone());

        if !self.started {
            self.started = true;
            let weak = Rc::downgrade(&self.state);
            let id = self
                .runtime
                .timers()
                .request_timer(self.delay_ms, Box::new(move || {
                    if let Some(state) = weak.upgrade() {
                        let mut state = state.borrow_mut();
                        state.fired = true;
                        state.id = None;
                        if let Some(waker) = state.waker.take() {
                            waker.wake();
                        }
                    }
                }));
            self.state.borrow_mut().id = Some(id);
        }

        Poll::Pending
    }
}
