use std::cell::RefCell;
use std::rc::Rc;

use fame_core::FameConfig;
use fame_dom::DocumentHandle;
use fame_testing::{FakeDocument, ManualRuntime};

use super::*;

fn setup() -> (UnifiedScrollManager, FakeDocument, ManualRuntime) {
    let document = FakeDocument::new();
    let handle = Rc::new(document.clone()) as DocumentHandle;
    let runtime = ManualRuntime::new();
    let manager = UnifiedScrollManager::new(handle, runtime.handle(), FameConfig::default());
    (manager, document, runtime)
}

#[test]
fn registers_exactly_one_scroll_listener_for_many_registrations() {
    let (manager, document, runtime) = setup();
    let calls = Rc::new(RefCell::new(Vec::new()));

    for i in 0..3 {
        let calls = calls.clone();
        manager.register(&format!("slot-{i}"), ScrollPriority::Medium, move || calls.borrow_mut().push(i));
    }

    document.scroll_to(10.0);
    runtime.advance_frame(16.0);
    assert_eq!(calls.borrow().len(), 3);
}

#[test]
fn dispatches_high_priority_before_low_priority() {
    let (manager, document, runtime) = setup();
    let order = Rc::new(RefCell::new(Vec::new()));

    {
        let order = order.clone();
        manager.register("low", ScrollPriority::Low, move || order.borrow_mut().push("low"));
    }
    {
        let order = order.clone();
        manager.register("high", ScrollPriority::High, move || order.borrow_mut().push("high"));
    }
    {
        let order = order.clone();
        manager.register("medium", ScrollPriority::Medium, move || order.borrow_mut().push("medium"));
    }

    document.scroll_to(5.0);
    runtime.advance_frame(16.0);
    assert_eq!(*order.borrow(), vec!["high", "medium", "low"]);
}

#[test]
fn collision_auto_suffixes_rather_than_overwriting() {
    let (manager, document, runtime) = setup();
    let calls = Rc::new(RefCell::new(0));

    let first = manager.register("dup", ScrollPriority::Medium, || {});
    let second_calls = calls.clone();
    let second = manager.register("dup", ScrollPriority::Medium, move || *second_calls.borrow_mut() += 1);

    assert_eq!(first, "dup");
    assert_ne!(second, "dup");

    document.scroll_to(1.0);
    runtime.advance_frame(16.0);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn deregistering_the_last_entry_removes_the_window_listener() {
    let (manager, document, runtime) = setup();
    let id = manager.register("only", ScrollPriority::Medium, || {});

    document.scroll_to(1.0);
    runtime.advance_frame(16.0);

    manager.deregister(&id);
    document.scroll_to(2.0);
    // No listener left, so the second scroll produces no scheduled frame.
    assert_eq!(runtime.pending_frame_count(), 0);
}

#[test]
fn yields_remaining_callbacks_to_the_next_frame_under_budget_pressure() {
    let document = FakeDocument::new();
    let handle = Rc::new(document.clone()) as DocumentHandle;
    let runtime = Rc::new(ManualRuntime::new());
    let config = FameConfig { scroll_frame_budget_ms: 1.0, ..FameConfig::default() };
    let manager = UnifiedScrollManager::new(handle, runtime.handle(), config);

    let order = Rc::new(RefCell::new(Vec::new()));
    {
        let order = order.clone();
        let runtime = runtime.clone();
        manager.register("slow", ScrollPriority::High, move || {
            order.borrow_mut().push("slow");
            // Simulate this callback alone blowing the whole frame budget.
            runtime.advance_millis(5.0);
        });
    }
    {
        let order = order.clone();
        manager.register("fast", ScrollPriority::Low, move || order.borrow_mut().push("fast"));
    }

    document.scroll_to(1.0);
    runtime.advance_frame(16.0);
    assert_eq!(*order.borrow(), vec!["slow"]);

    // A follow-up frame (scheduled by the manager itself, not a new scroll
    // event) picks up the rest.
    runtime.advance_frame(32.0);
    assert_eq!(*order.borrow(), vec!["slow", "fast"]);
}
