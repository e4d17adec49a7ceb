use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use super::*;

struct NoopWake;
impl Wake for NoopWake {
    fn wake(self: Arc<Self>) {}
}

fn noop_cx() -> Context<'static> {
    let waker = Box::leak(Box::new(Waker::from(Arc::new(NoopWake))));
    Context::from_waker(waker)
}

#[test]
fn unknown_id_reads_as_idle_and_zero_progress() {
    let store = AnimationStateStore::new();
    assert_eq!(store.progress("missing"), 0.0);
    assert_eq!(store.target_progress("missing"), 0.0);
    assert_eq!(store.status("missing"), AnimationStatus::Idle);
}

#[test]
fn update_progress_and_target_clamp_to_unit_range() {
    let store = AnimationStateStore::new();
    store.update_target("slot", 1.5);
    assert_eq!(store.target_progress("slot"), 1.0);
    store.update_target("slot", -0.5);
    assert_eq!(store.target_progress("slot"), 0.0);

    store.update_progress("slot", 2.0, AnimationStatus::Running);
    assert_eq!(store.progress("slot"), 1.0);
    assert_eq!(store.status("slot"), AnimationStatus::Running);

    store.update_progress("slot", -3.0, AnimationStatus::Running);
    assert_eq!(store.progress("slot"), 0.0);
}

#[test]
fn cancel_active_animations_runs_cleanups_once_and_freezes_progress() {
    let store = AnimationStateStore::new();
    store.update_progress("slot", 0.4, AnimationStatus::Running);

    let ran = Rc::new(RefCell::new(0));
    let ran_clone = ran.clone();
    store.register_cleanup("slot", move || *ran_clone.borrow_mut() += 1);
    let ran_clone2 = ran.clone();
    store.register_cleanup("slot", move || *ran_clone2.borrow_mut() += 1);

    store.cancel_active_animations("slot");

    assert_eq!(*ran.borrow(), 2);
    assert_eq!(store.status("slot"), AnimationStatus::Cancelled);
    // progress is left exactly where it was last sampled.
    assert_eq!(store.progress("slot"), 0.4);

    // a second cancel has nothing left to run.
    store.cancel_active_animations("slot");
    assert_eq!(*ran.borrow(), 2);
}

#[test]
fn complete_sets_final_progress_and_drops_cleanups_without_running_them() {
    let store = AnimationStateStore::new();
    store.update_progress("slot", 0.5, AnimationStatus::Running);

    let ran = Rc::new(RefCell::new(false));
    let ran_clone = ran.clone();
    store.register_cleanup("slot", move || *ran_clone.borrow_mut() = true);

    store.complete("slot", 1.0);

    assert_eq!(store.progress("slot"), 1.0);
    assert_eq!(store.status("slot"), AnimationStatus::Completed);
    assert!(!*ran.borrow());
}

#[test]
fn teardown_runs_cleanups_and_removes_the_entry() {
    let store = AnimationStateStore::new();
    store.update_progress("slot", 0.2, AnimationStatus::Running);

    let ran = Rc::new(RefCell::new(false));
    let ran_clone = ran.clone();
    store.register_cleanup("slot", move || *ran_clone.borrow_mut() = true);

    store.teardown("slot");

    assert!(*ran.borrow());
    // the entry is gone, so reads fall back to defaults.
    assert_eq!(store.progress("slot"), 0.0);
    assert_eq!(store.status("slot"), AnimationStatus::Idle);
}

#[test]
fn wait_for_completion_is_pending_until_a_terminal_transition_then_resolves() {
    let store = AnimationStateStore::new();
    store.update_progress("slot", 0.1, AnimationStatus::Running);

    let mut waiter = Box::pin(store.wait_for_completion("slot"));
    let mut cx = noop_cx();
    assert!(matches!(waiter.as_mut().poll(&mut cx), Poll::Pending));

    store.complete("slot", 1.0);

    match waiter.as_mut().poll(&mut cx) {
        Poll::Ready(status) => assert_eq!(status, AnimationStatus::Completed),
        Poll::Pending => panic!("expected wait_for_completion to resolve after complete()"),
    }
}

#[test]
fn wait_for_completion_resolves_on_cancel_too() {
    let store = AnimationStateStore::new();
    store.update_progress("slot", 0.1, AnimationStatus::Running);

    let mut waiter = Box::pin(store.wait_for_completion("slot"));
    let mut cx = noop_cx();
    assert!(matches!(waiter.as_mut().poll(&mut cx), Poll::Pending));

    store.cancel_active_animations("slot");

    match waiter.as_mut().poll(&mut cx) {
        Poll::Ready(status) => assert_eq!(status, AnimationStatus::Cancelled),
        Poll::Pending => panic!("expected wait_for_completion to resolve after cancel"),
    }
}

#[test]
fn wait_for_completion_on_an_already_terminal_slot_resolves_immediately() {
    let store = AnimationStateStore::new();
    store.complete("slot", 1.0);

    let mut waiter = Box::pin(store.wait_for_completion("slot"));
    let mut cx = noop_cx();
    match waiter.as_mut().poll(&mut cx) {
        Poll::Ready(status) => assert_eq!(status, AnimationStatus::Completed),
        Poll::Pending => panic!("expected immediate resolution for an already-terminal slot"),
    }
}

#[test]
fn teardown_wakes_any_outstanding_waiters() {
    struct FlagWake(Rc<RefCell<bool>>);
    // Waker requires Send + Sync; tests stay single-threaded so this is never
    // actually sent across a thread.
    unsafe impl Send for FlagWake {}
    unsafe impl Sync for FlagWake {}
    impl Wake for FlagWake {
        fn wake(self: Arc<Self>) {
            *self.0.borrow_mut() = true;
        }
    }

    let store = AnimationStateStore::new();
    store.update_progress("slot", 0.1, AnimationStatus::Running);

    let woken = Rc::new(RefCell::new(false));
    let waker = Waker::from(Arc::new(FlagWake(woken.clone())));
    let mut cx = Context::from_waker(&waker);

    let mut waiter = Box::pin(store.wait_for_completion("slot"));
    assert!(matches!(waiter.as_mut().poll(&mut cx), Poll::Pending));
    assert!(!*woken.borrow());

    store.teardown("slot");
    assert!(*woken.borrow());
}
