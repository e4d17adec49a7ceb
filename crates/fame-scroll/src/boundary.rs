//! Scroll Progress Tracker (C16): resolves a trigger element's scroll
//! boundaries into a `0..1` progress value, generalizing a
//! `ScrollPositionResolver`-style tolerance-driven numeric bucketing idiom
//! from 1-D lazy list offsets to the 1-D scroll-space axis this engine
//! scrubs against.
//!
//! Cache discipline (§4.16, §9): `startPx`/`endPx` are derived from the
//! element's document-relative top plus its own and the viewport's current
//! height, and are recomputed only when a `ResizeObserver` fires on the
//! tracked element — never on a timer, never per scroll frame.

use std::cell::Cell;
use std::rc::Rc;

use fame_dom::{Document, DocumentHandle, ElementHandle, ListenerId};
use serde::{Deserialize, Serialize};

/// A scroll-space length: either an absolute pixel offset or a percentage
/// of the reference dimension it is paired with (an element's height for
/// `ScrollBoundary::element`, the viewport's height for `::viewport`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Parses `"0%"`, `"100%"`, `"32px"`, or a bare number (treated as px).
    /// Unparseable input falls back to `0%`, matching the "nothing in the
    /// core raises" degrade-gracefully policy (§7).
    pub fn parse(raw: &str) -> Length {
        let s = raw.trim();
        if let Some(pct) = s.strip_suffix('%') {
            if let Ok(n) = pct.trim().parse::<f64>() {
                return Length::Percent(n);
            }
        } else if let Some(px) = s.strip_suffix("px") {
            if let Ok(n) = px.trim().parse::<f64>() {
                return Length::Px(n);
            }
        } else if let Ok(n) = s.parse::<f64>() {
            return Length::Px(n);
        }
        log::warn!("fame-scroll: unparseable length {raw:?}; treating as 0%");
        Length::Percent(0.0)
    }

    pub fn resolve_px(&self, reference_px: f64) -> f64 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => pct / 100.0 * reference_px,
        }
    }
}

/// One end of a scroll window: a point expressed relative to both the
/// tracked element and the viewport (§3's `ScrollConfig.boundaries.{start,end}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollBoundary {
    pub element: Length,
    pub viewport: Length,
}

impl ScrollBoundary {
    pub fn new(element: Length, viewport: Length) -> Self {
        Self { element, viewport }
    }
}

/// The full scrubbed-scroll window authoring config (§3's `ScrollConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollBoundaries {
    pub start: ScrollBoundary,
    pub end: ScrollBoundary,
}

impl ScrollBoundaries {
    pub fn new(start: ScrollBoundary, end: ScrollBoundary) -> Self {
        Self { start, end }
    }
}

/// Tracks one trigger element's scroll progress against its resolved
/// boundaries. One tracker per `(trigger element, ScrollConfig)` pair; the
/// Stagger Coordinator fans a single tracker's progress out per animated
/// element (§4.15's scrubbed-scroll mode).
pub struct ScrollProgressTracker {
    element: ElementHandle,
    boundaries: ScrollBoundaries,
    /// `(start_px, end_px)`, memoized until a resize invalidates it.
    cached: Cell<Option<(f64, f64)>>,
    resize_listener: Cell<Option<ListenerId>>,
}

impl ScrollProgressTracker {
    /// Creates a tracker and registers its `ResizeObserver` invalidation
    /// hook on `element`. Returned as an `Rc` since the registered resize
    /// callback holds a weak reference back to `self`.
    pub fn new(document: &DocumentHandle, element: ElementHandle, boundaries: ScrollBoundaries) -> Rc<Self> {
        let tracker = Rc::new(Self {
            element,
            boundaries,
            cached: Cell::new(None),
            resize_listener: Cell::new(None),
        });
        let weak = Rc::downgrade(&tracker);
        let listener = document.resize_observe(
            &tracker.element,
            Box::new(move || {
                if let Some(tracker) = weak.upgrade() {
                    tracker.invalidate();
                }
            }),
        );
        tracker.resize_listener.set(Some(listener));
        tracker
    }

    /// Drops the cached boundary window, forcing the next `progress` call
    /// to re-measure. Called automatically on a `ResizeObserver` firing;
    /// exposed so a host can also force it on a layout-affecting event the
    /// observer doesn't cover (e.g. a font swap).
    pub fn invalidate(&self) {
        self.cached.set(None);
    }

    pub fn teardown(&self, document: &DocumentHandle) {
        if let Some(listener) = self.resize_listener.take() {
            document.unobserve_resize(listener);
        }
    }

    /// Current scroll progress in `[0, 1]` (§4.16): `clamp01((s - startPx) /
    /// (endPx - startPx))`. Scrolling before `startPx` always yields exactly
    /// `0.0`, satisfying the "no premature non-zero sample" invariant (§8).
    pub fn progress(&self, document: &dyn Document) -> f64 {
        let (start_px, end_px) = self.boundary_window(document);
        let s = document.scroll_y();
        let span = end_px - start_px;
        if span == 0.0 {
            return if s >= start_px { 1.0 } else { 0.0 };
        }
        ((s - start_px) / span).clamp(0.0, 1.0)
    }

    fn boundary_window(&self, document: &dyn Document) -> (f64, f64) {
        if let Some(cached) = self.cached.get() {
            return cached;
        }
        let rect = self.element.bounding_client_rect();
        let scroll_y = document.scroll_y();
        let element_top_doc = rect.top() + scroll_y;
        let viewport_h = document.viewport_height();

        let start_px = element_top_doc + self.boundaries.start.element.resolve_px(rect.height)
            - self.boundaries.start.viewport.resolve_px(viewport_h);
        let end_px = element_top_doc + self.boundaries.end.element.resolve_px(rect.height)
            - self.boundaries.end.viewport.resolve_px(viewport_h);

        self.cached.set(Some((start_px, end_px)));
        (start_px, end_px)
    }
}

#[cfg(test)]
#[path = "tests/boundary_tests.rs"]
mod tests;
