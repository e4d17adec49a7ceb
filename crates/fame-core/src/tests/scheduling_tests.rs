use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::platform::{Clock, FrameCallbackId, FrameScheduler, RuntimeHandle, TimerCallbackId, TimerScheduler};
use crate::{with_frame_millis, Delay, NextFrame};

/// A manually-pumped scheduler for tests: nothing fires until `run_frame`/
/// `run_timers_due` is called, so assertions can step the engine one tick at
/// a time without a real event loop.
#[derive(Default)]
struct ManualScheduler {
    next_frame_id: RefCell<u64>,
    frame_callbacks: RefCell<Vec<(FrameCallbackId, Box<dyn FnOnce(f64)>)>>,
    next_timer_id: RefCell<u64>,
    timers: RefCell<Vec<(TimerCallbackId, u32, Box<dyn FnOnce()>)>>,
    now: RefCell<f64>,
}

impl ManualScheduler {
    fn run_frame(&self, time: f64) {
        let due: Vec<_> = self.frame_callbacks.borrow_mut().drain(..).collect();
        for (_, cb) in due {
            cb(time);
        }
    }

    fn advance(&self, millis: f64) {
        *self.now.borrow_mut() += millis;
        let now = *self.now.borrow();
        let mut timers = self.timers.borrow_mut();
        let (due, remaining): (Vec<_>, Vec<_>) = timers.drain(..).partition(|(_, at, _)| *at as f64 <= now);
        *timers = remaining;
        drop(timers);
        for (_, _, cb) in due {
            cb();
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> FrameCallbackId {
        let mut id = self.next_frame_id.borrow_mut();
        *id += 1;
        let id = FrameCallbackId(*id);
        self.frame_callbacks.borrow_mut().push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameCallbackId) {
        self.frame_callbacks.borrow_mut().retain(|(cb_id, _)| *cb_id != id);
    }
}

impl TimerScheduler for ManualScheduler {
    fn request_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerCallbackId {
        let mut id = self.next_timer_id.borrow_mut();
        *id += 1;
        let id = TimerCallbackId(*id);
        let at = *self.now.borrow() as u32 + delay_ms;
        self.timers.borrow_mut().push((id, at, callback));
        id
    }

    fn cancel_timer(&self, id: TimerCallbackId) {
        self.timers.borrow_mut().retain(|(cb_id, _, _)| *cb_id != id);
    }
}

impl Clock for ManualScheduler {
    fn now_millis(&self) -> f64 {
        *self.now.borrow()
    }
}

fn runtime() -> (RuntimeHandle, Rc<ManualScheduler>) {
    let sched = Rc::new(ManualScheduler::default());
    let handle = RuntimeHandle::new(sched.clone(), sched.clone(), sched.clone());
    (handle, sched)
}

#[test]
fn frame_registration_fires_once() {
    let (runtime, sched) = runtime();
    let fired = Rc::new(RefCell::new(None));
    let fired_clone = fired.clone();
    let reg = with_frame_millis(&runtime, move |t| {
        *fired_clone.borrow_mut() = Some(t);
    });
    sched.run_frame(16.0);
    assert_eq!(*fired.borrow(), Some(16.0));
    drop(reg);
}

#[test]
fn frame_registration_cancel_prevents_callback() {
    let (runtime, sched) = runtime();
    let fired = Rc::new(RefCell::new(false));
    let fired_clone = fired.clone();
    let reg = with_frame_millis(&runtime, move |_| {
        *fired_clone.borrow_mut() = true;
    });
    reg.cancel();
    sched.run_frame(16.0);
    assert!(!*fired.borrow());
}

#[test]
fn next_frame_future_resolves_with_timestamp() {
    use std::task::{Context, Poll, Wake, Waker};

    struct NoopWake;
    impl Wake for NoopWake {
        fn wake(self: Arc<Self>) {}
    }
    use std::sync::Arc;

    let (runtime, sched) = runtime();
    let mut fut = Box::pin(NextFrame::new(runtime));
    let waker = Waker::from(Arc::new(NoopWake));
    let mut cx = Context::from_waker(&waker);

    assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
    sched.run_frame(33.5);
    match fut.as_mut().poll(&mut cx) {
        Poll::Ready(t) => assert_eq!(t, 33.5),
        Poll::Pending => panic!("expected NextFrame to resolve after a frame ran"),
    }
}

#[test]
fn delay_resolves_after_requested_time_not_before() {
    use std::task::{Context, Poll, Wake, Waker};
    use std::sync::Arc;

    struct NoopWake;
    impl Wake for NoopWake {
        fn wake(self: Arc<Self>) {}
    }

    let (runtime, sched) = runtime();
    let mut fut = Box::pin(Delay::new(runtime, 100));
    let waker = Waker::from(Arc::new(NoopWake));
    let mut cx = Context::from_waker(&waker);

    assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
    sched.advance(50.0);
    assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
    sched.advance(50.0);
    assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Ready(())));
}
