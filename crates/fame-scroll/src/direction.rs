//! Scroll Direction Detector (C18): fires direction-change callbacks,
//! ignoring the very first scroll event (nothing to compare it against
//! yet). Deliberately isolated from the Unified Scroll Manager (C17):
//! its own passive listener avoids coupling this component's lifecycle to
//! C17's priority/budget dispatch, per §4.18.

use fame_core::Owned;
use fame_dom::DocumentHandle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

struct Subscriber {
    id: u64,
    callback: std::rc::Rc<dyn Fn(ScrollDirection)>,
}

struct DetectorInner {
    document: DocumentHandle,
    last_scroll_y: f64,
    current_direction: Option<ScrollDirection>,
    is_first_event: bool,
    listener: Option<fame_dom::ListenerId>,
    subscribers: Vec<Subscriber>,
    next_subscriber_id: u64,
}

/// One detector per document; every `SCROLL_DIRECTION_CHANGE` trigger
/// across every slot subscribes to the same instance.
#[derive(Clone)]
pub struct ScrollDirectionDetector {
    inner: Owned<DetectorInner>,
}

impl ScrollDirectionDetector {
    pub fn new(document: DocumentHandle) -> Self {
        let last_scroll_y = document.scroll_y();
        Self {
            inner: Owned::new(DetectorInner {
                document,
                last_scroll_y,
                current_direction: None,
                is_first_event: true,
                listener: None,
                subscribers: Vec::new(),
                next_subscriber_id: 0,
            }),
        }
    }

    /// Subscribes `callback`, firing it on every subsequent direction
    /// change. Returns a subscriber id for `unsubscribe`. Registers this
    /// detector's own scroll listener on first subscription.
    pub fn subscribe(&self, callback: impl Fn(ScrollDirection) + 'static) -> u64 {
        let id = self.inner.update(|inner| {
            let id = inner.next_subscriber_id;
            inner.next_subscriber_id += 1;
            inner.subscribers.push(Subscriber { id, callback: std::rc::Rc::new(callback) });
            id
        });
        self.ensure_listener();
        id
    }

    pub fn unsubscribe(&self, id: u64) {
        let now_empty = self.inner.update(|inner| {
            inner.subscribers.retain(|s| s.id != id);
            inner.subscribers.is_empty()
        });
        if now_empty {
            self.remove_listener();
        }
    }

    fn ensure_listener(&self) {
        if self.inner.with(|inner| inner.listener.is_some()) {
            return;
        }
        let document = self.inner.with(|inner| inner.document.clone());
        let weak = self.inner.downgrade();
        let listener = document.add_scroll_listener(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Self::on_scroll(inner);
            }
        }));
        self.inner.update(|inner| inner.listener = Some(listener));
    }

    fn remove_listener(&self) {
        let (document, listener) = self.inner.update(|inner| (inner.document.clone(), inner.listener.take()));
        if let Some(listener) = listener {
            document.remove_scroll_listener(listener);
        }
    }

    fn on_scroll(inner: Owned<DetectorInner>) {
        let document = inner.with(|i| i.document.clone());
        let y = document.scroll_y();

        let (delta, is_first_event) = inner.update(|i| {
            let delta = y - i.last_scroll_y;
            let was_first = i.is_first_event;
            i.last_scroll_y = y;
            i.is_first_event = false;
            (delta, was_first)
        });

        if delta == 0.0 {
            return;
        }
        let direction = if delta > 0.0 { ScrollDirection::Forward } else { ScrollDirection::Backward };

        if is_first_event {
            // Record the baseline direction without firing subscribers.
            inner.update(|i| i.current_direction = Some(direction));
            return;
        }

        let changed = inner.with(|i| i.current_direction != Some(direction));
        if !changed {
            return;
        }
        inner.update(|i| i.current_direction = Some(direction));

        let callbacks: Vec<std::rc::Rc<dyn Fn(ScrollDirection)>> =
            inner.with(|i| i.subscribers.iter().map(|s| s.callback.clone()).collect());
        for callback in callbacks {
            callback(direction);
        }
    }
}

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod tests;
