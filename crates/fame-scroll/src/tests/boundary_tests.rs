use std::rc::Rc;

use fame_dom::DocumentHandle;
use fame_testing::{FakeDocument, FakeElement};

use super::*;

fn setup() -> (DocumentHandle, FakeDocument, FakeElement) {
    let document = FakeDocument::new();
    document.set_viewport(1000.0, 800.0);
    let element = FakeElement::new("div").with_rect(fame_dom::Rect { x: 0.0, y: 500.0, width: 200.0, height: 100.0 });
    document.register(&element);
    (Rc::new(document.clone()) as DocumentHandle, document, element)
}

#[test]
fn start_when_element_top_hits_viewport_bottom() {
    let (handle, document, element) = setup();
    let boundaries = ScrollBoundaries::new(
        ScrollBoundary::new(Length::Percent(0.0), Length::Percent(100.0)),
        ScrollBoundary::new(Length::Percent(100.0), Length::Percent(0.0)),
    );
    let tracker = ScrollProgressTracker::new(&handle, element.handle(), boundaries);

    // element top at document-y 500, viewport bottom offset is 800px, so
    // start fires at scrollY = 500 - 800 = -300 (already past at scrollY 0).
    document.set_scroll_y(0.0);
    assert!(tracker.progress(&document) > 0.0);
}

#[test]
fn scrolling_before_start_yields_exactly_zero() {
    let (handle, document, element) = setup();
    let boundaries = ScrollBoundaries::new(
        ScrollBoundary::new(Length::Percent(0.0), Length::Percent(0.0)),
        ScrollBoundary::new(Length::Percent(100.0), Length::Percent(100.0)),
    );
    let tracker = ScrollProgressTracker::new(&handle, element.handle(), boundaries);

    // start_px = element_top_doc(500) + 0 - 0 = 500; well above scrollY=0.
    document.set_scroll_y(0.0);
    assert_eq!(tracker.progress(&document), 0.0);

    document.set_scroll_y(499.0);
    assert_eq!(tracker.progress(&document), 0.0);
}

#[test]
fn progress_is_clamped_and_monotonic_through_the_window() {
    let (handle, document, element) = setup();
    // start_px = 500 + 0 - 0 = 500; end_px = 500 + 100 - 0 = 600.
    let boundaries = ScrollBoundaries::new(
        ScrollBoundary::new(Length::Percent(0.0), Length::Percent(0.0)),
        ScrollBoundary::new(Length::Percent(100.0), Length::Percent(0.0)),
    );
    let tracker = ScrollProgressTracker::new(&handle, element.handle(), boundaries);

    document.set_scroll_y(500.0);
    assert_eq!(tracker.progress(&document), 0.0);
    document.set_scroll_y(550.0);
    assert!((tracker.progress(&document) - 0.5).abs() < 1e-9);
    document.set_scroll_y(700.0);
    assert_eq!(tracker.progress(&document), 1.0);
}

#[test]
fn cache_is_invalidated_only_by_resize() {
    let (handle, document, element) = setup();
    let boundaries = ScrollBoundaries::new(
        ScrollBoundary::new(Length::Percent(0.0), Length::Percent(0.0)),
        ScrollBoundary::new(Length::Percent(100.0), Length::Percent(0.0)),
    );
    let tracker = ScrollProgressTracker::new(&handle, element.handle(), boundaries);

    document.set_scroll_y(550.0);
    assert!((tracker.progress(&document) - 0.5).abs() < 1e-9);

    // Moving the element without firing a resize must not change the
    // memoized window: progress stays pinned to the stale geometry.
    element.set_rect(fame_dom::Rect { x: 0.0, y: 0.0, width: 200.0, height: 100.0 });
    assert!((tracker.progress(&document) - 0.5).abs() < 1e-9);

    document.fire_resize(&element);
    // After invalidation the window is recomputed against the new rect
    // (element_top_doc now 0 + scrollY 550 = 550; start_px=550, end_px=650).
    assert_eq!(tracker.progress(&document), 0.0);
}
