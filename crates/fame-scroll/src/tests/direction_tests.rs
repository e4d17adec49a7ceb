use std::cell::RefCell;
use std::rc::Rc;

use fame_dom::DocumentHandle;
use fame_testing::FakeDocument;

use super::*;

fn setup() -> (ScrollDirectionDetector, FakeDocument) {
    let document = FakeDocument::new();
    let handle = Rc::new(document.clone()) as DocumentHandle;
    (ScrollDirectionDetector::new(handle), document)
}

#[test]
fn first_scroll_event_records_a_baseline_without_firing() {
    let (detector, document) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        detector.subscribe(move |dir| seen.borrow_mut().push(dir));
    }

    document.scroll_to(10.0);
    assert!(seen.borrow().is_empty());
}

#[test]
fn direction_change_fires_subscribers() {
    let (detector, document) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        detector.subscribe(move |dir| seen.borrow_mut().push(dir));
    }

    // Baseline: scrolling forward.
    document.scroll_to(10.0);
    assert!(seen.borrow().is_empty());

    // Still forward: no change, no callback.
    document.scroll_to(20.0);
    assert!(seen.borrow().is_empty());

    // Reverses to backward: fires once.
    document.scroll_to(5.0);
    assert_eq!(*seen.borrow(), vec![ScrollDirection::Backward]);

    // Forward again: fires again.
    document.scroll_to(15.0);
    assert_eq!(*seen.borrow(), vec![ScrollDirection::Backward, ScrollDirection::Forward]);
}

#[test]
fn zero_delta_scroll_is_ignored() {
    let (detector, document) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        detector.subscribe(move |dir| seen.borrow_mut().push(dir));
    }

    document.scroll_to(10.0);
    document.scroll_to(5.0);
    assert_eq!(*seen.borrow(), vec![ScrollDirection::Backward]);

    // No actual movement: must not flip or re-fire the baseline.
    document.scroll_to(5.0);
    assert_eq!(*seen.borrow(), vec![ScrollDirection::Backward]);
}

#[test]
fn multiple_subscribers_all_fire() {
    let (detector, document) = setup();
    let a = Rc::new(RefCell::new(Vec::new()));
    let b = Rc::new(RefCell::new(Vec::new()));
    {
        let a = a.clone();
        detector.subscribe(move |dir| a.borrow_mut().push(dir));
    }
    {
        let b = b.clone();
        detector.subscribe(move |dir| b.borrow_mut().push(dir));
    }

    document.scroll_to(10.0);
    document.scroll_to(0.0);

    assert_eq!(*a.borrow(), vec![ScrollDirection::Backward]);
    assert_eq!(*b.borrow(), vec![ScrollDirection::Backward]);
}

#[test]
fn unsubscribing_the_last_subscriber_removes_the_listener() {
    let (detector, document) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let id = {
        let seen = seen.clone();
        detector.subscribe(move |dir| seen.borrow_mut().push(dir))
    };

    document.scroll_to(10.0);
    document.scroll_to(0.0);
    assert_eq!(seen.borrow().len(), 1);

    detector.unsubscribe(id);
    document.scroll_to(50.0);
    // No listener left, so the scroll event reached nothing.
    assert_eq!(seen.borrow().len(), 1);
}
