//! Dynamic Element Registry (C8): maps a stable `data-fame-element-id` to
//! the current DOM node, so running animations can store an id and never a
//! node reference. Per §9's "stale DOM references" guidance, per-frame
//! resolution cost is negligible and sidesteps the whole class of
//! disconnected-element bugs that re-splitting (`fame-text`) would
//! otherwise cause.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fame_core::platform::Clock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::document::{Document, Element, ElementHandle};

pub const ELEMENT_ID_ATTRIBUTE: &str = "data-fame-element-id";

/// Policy applied when an id can no longer be resolved to a live element
/// (§7: "Element id miss -> policy-driven silent|warn|error; default warn").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissPolicy {
    Silent,
    #[default]
    Warn,
    Error,
}

pub struct DynamicElementRegistry {
    clock: Rc<dyn Clock>,
    policy: MissPolicy,
    handles: RefCell<FxHashMap<String, Weak<dyn Element>>>,
    mint_counter: RefCell<u64>,
}

impl DynamicElementRegistry {
    pub fn new(clock: Rc<dyn Clock>, policy: MissPolicy) -> Self {
        Self {
            clock,
            policy,
            handles: RefCell::new(FxHashMap::default()),
            mint_counter: RefCell::new(0),
        }
    }

    /// Reads `element`'s existing `data-fame-element-id`, or mints and
    /// assigns a fresh one (`fame-dynamic-<ts>-<counter>`), then registers
    /// a weak handle under that id.
    pub fn ensure_element_id(&self, element: &ElementHandle) -> String {
        let id = match element.attribute(ELEMENT_ID_ATTRIBUTE) {
            Some(existing) => existing,
            None => {
                let mut counter = self.mint_counter.borrow_mut();
                *counter += 1;
                let minted = format!("fame-dynamic-{}-{}", self.clock.now_millis() as u64, *counter);
                element.set_attribute(ELEMENT_ID_ATTRIBUTE, &minted);
                minted
            }
        };
        self.register(&id, element);
        id
    }

    pub fn register(&self, id: &str, element: &ElementHandle) {
        self.handles.borrow_mut().insert(id.to_string(), Rc::downgrade(element));
    }

    pub fn unregister(&self, id: &str) {
        self.handles.borrow_mut().remove(id);
    }

    /// Resolves `id` to a live element: first the cached weak handle (if it
    /// hasn't been dropped), then `[data-fame-element-id="id"]`, then
    /// `getElementById(id)`, per §4.8's two-strategy resolution order.
    pub fn resolve(&self, document: &dyn Document, id: &str) -> Option<ElementHandle> {
        if let Some(weak) = self.handles.borrow().get(id) {
            if let Some(strong) = weak.upgrade() {
                return Some(strong);
            }
        }

        let selector = format!("[{ELEMENT_ID_ATTRIBUTE}=\"{id}\"]");
        let found = document
            .query_selector_all(&selector)
            .into_iter()
            .next()
            .or_else(|| document.element_by_id(id));

        match found {
            Some(element) => {
                self.register(id, &element);
                Some(element)
            }
            None => {
                self.report_miss(id);
                None
            }
        }
    }

    fn report_miss(&self, id: &str) {
        match self.policy {
            MissPolicy::Silent => {}
            MissPolicy::Warn => log::warn!("fame-dom: element id {id:?} could not be resolved"),
            MissPolicy::Error => log::error!("fame-dom: element id {id:?} could not be resolved"),
        }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
