//! Shared DOM listener registry: generalizes the Unified Scroll Manager's
//! (`fame-scroll`) "one real listener fanned out to many registrants" idiom
//! from the window `scroll` event to arbitrary element events (`click`,
//! `mouseover`, `mouseout`), keyed by `(element identity, event name)` so two
//! triggers on the same element and event share one real DOM listener.

use std::rc::Rc;

use fame_core::Owned;
use fame_dom::{ElementHandle, ListenerId};
use rustc_hash::FxHashMap;

type RecordKey = (usize, String);

struct SharedEntry {
    element: ElementHandle,
    dom_listener: ListenerId,
    records: Vec<(u64, Rc<dyn Fn()>)>,
    next_record_id: u64,
}

#[derive(Clone, Default)]
pub struct SharedListenerRegistry {
    entries: Owned<FxHashMap<RecordKey, SharedEntry>>,
}

impl SharedListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `event` on `element`. The first registrant
    /// for a given `(element, event)` pair installs the real DOM listener;
    /// later registrants just add a record that listener fans out to.
    pub fn add(&self, element: &ElementHandle, event: &str, callback: impl Fn() + 'static) -> SharedListenerHandle {
        let key: RecordKey = (element.identity(), event.to_string());
        self.ensure_entry(element, event, &key);
        let record_id = self.entries.update(|entries| {
            let entry = entries.get_mut(&key).expect("entry just ensured");
            let id = entry.next_record_id;
            entry.next_record_id += 1;
            entry.records.push((id, Rc::new(callback)));
            id
        });
        SharedListenerHandle { registry: self.clone(), key, record_id }
    }

    fn ensure_entry(&self, element: &ElementHandle, event: &str, key: &RecordKey) {
        if self.entries.with(|entries| entries.contains_key(key)) {
            return;
        }
        let weak = self.entries.downgrade();
        let key_for_dispatch = key.clone();
        let dom_listener = element.add_event_listener(
            event,
            Box::new(move || {
                let Some(entries) = weak.upgrade() else { return };
                let records: Vec<Rc<dyn Fn()>> = entries.with(|entries| {
                    entries
                        .get(&key_for_dispatch)
                        .map(|entry| entry.records.iter().map(|(_, callback)| callback.clone()).collect())
                        .unwrap_or_default()
                });
                for callback in records {
                    callback();
                }
            }),
        );
        self.entries.update(|entries| {
            entries.insert(
                key.clone(),
                SharedEntry { element: element.clone(), dom_listener, records: Vec::new(), next_record_id: 0 },
            );
        });
    }

    fn remove(&self, key: &RecordKey, record_id: u64) {
        let emptied_entry = self.entries.update(|entries| {
            let Some(entry) = entries.get_mut(key) else { return None };
            entry.records.retain(|(id, _)| *id != record_id);
            if entry.records.is_empty() { entries.remove(key) } else { None }
        });
        if let Some(entry) = emptied_entry {
            entry.element.remove_event_listener(&key.1, entry.dom_listener);
        }
    }
}

/// A single registrant's handle, removed explicitly rather than on `Drop`
/// (matches `UnifiedScrollManager::deregister`'s explicit-id idiom).
pub struct SharedListenerHandle {
    registry: SharedListenerRegistry,
    key: RecordKey,
    record_id: u64,
}

impl SharedListenerHandle {
    pub fn remove(&self) {
        self.registry.remove(&self.key, self.record_id);
    }
}

#[cfg(test)]
#[path = "tests/listener_registry_tests.rs"]
mod tests;
