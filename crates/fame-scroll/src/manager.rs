//! Unified Scroll Manager (C17): a single passive window `scroll` listener
//! shared by every registered animation, RAF-batching dispatch in priority
//! order under a per-frame time budget. Generalizes a "one source of truth
//! per scroll container" discipline from a single lazy list's own viewport
//! to every slot in the whole page sharing one listener.

use std::rc::Rc;

use fame_core::frame_clock::{with_frame_millis, FrameCallbackRegistration};
use fame_core::platform::RuntimeHandle;
use fame_core::{FameConfig, Owned};
use fame_dom::DocumentHandle;
use serde::{Deserialize, Serialize};

/// Dispatch priority for a scroll registration. Declared high-to-low so the
/// derived `Ord` sorts registrations into the processing order §4.17 calls
/// for directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScrollPriority {
    High,
    Medium,
    Low,
}

#[derive(Clone)]
struct Registration {
    id: String,
    priority: ScrollPriority,
    callback: Rc<dyn Fn()>,
}

struct ManagerInner {
    document: DocumentHandle,
    runtime: RuntimeHandle,
    frame_budget_ms: f64,
    registrations: Vec<Registration>,
    scroll_listener: Option<fame_dom::ListenerId>,
    raf_registration: Option<FrameCallbackRegistration>,
    /// Index into the priority-sorted registration list to resume from when
    /// the previous frame's budget ran out mid-dispatch.
    resume_at: usize,
}

/// The single shared window-scroll dispatcher. One instance per document;
/// every scrubbed-scroll slot and every `SCROLL` trigger registers against
/// the same `UnifiedScrollManager`.
#[derive(Clone)]
pub struct UnifiedScrollManager {
    inner: Owned<ManagerInner>,
}

impl UnifiedScrollManager {
    pub fn new(document: DocumentHandle, runtime: RuntimeHandle, config: FameConfig) -> Self {
        Self {
            inner: Owned::new(ManagerInner {
                document,
                runtime,
                frame_budget_ms: config.scroll_frame_budget_ms,
                registrations: Vec::new(),
                scroll_listener: None,
                raf_registration: None,
                resume_at: 0,
            }),
        }
    }

    /// Registers `callback` under `id` and `priority`. Collisions are
    /// auto-suffixed (`id-1`, `id-2`, ...) rather than silently overwriting
    /// the existing registration (§4.17), and the collision is logged as an
    /// error per §7's "Scroll registration id collision" policy. Returns the
    /// id actually used, which the caller must keep to `deregister` later.
    /// Ensures the shared window listener exists.
    pub fn register(&self, id: &str, priority: ScrollPriority, callback: impl Fn() + 'static) -> String {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        let unique_id = self.inner.update(|inner| {
            let mut candidate = id.to_string();
            let mut suffix = 1u32;
            while inner.registrations.iter().any(|r| r.id == candidate) {
                log::error!("fame-scroll: registration id {id:?} collides with an existing one; auto-suffixing");
                candidate = format!("{id}-{suffix}");
                suffix += 1;
            }
            inner.registrations.push(Registration { id: candidate.clone(), priority, callback: callback.clone() });
            candidate
        });
        self.ensure_listener();
        unique_id
    }

    /// Removes `id`'s registration. When no registrations remain, the
    /// window scroll listener itself is removed (§4.17).
    pub fn deregister(&self, id: &str) {
        let now_empty = self.inner.update(|inner| {
            inner.registrations.retain(|r| r.id != id);
            inner.registrations.is_empty()
        });
        if now_empty {
            self.remove_listener();
        }
    }

    fn ensure_listener(&self) {
        if self.inner.with(|inner| inner.scroll_listener.is_some()) {
            return;
        }
        let document = self.inner.with(|inner| inner.document.clone());
        let weak = self.inner.downgrade();
        let listener_id = document.add_scroll_listener(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Self::on_scroll(inner);
            }
        }));
        self.inner.update(|inner| inner.scroll_listener = Some(listener_id));
    }

    fn remove_listener(&self) {
        let (document, listener) = self.inner.update(|inner| (inner.document.clone(), inner.scroll_listener.take()));
        if let Some(listener) = listener {
            document.remove_scroll_listener(listener);
        }
    }

    /// Schedules a single RAF callback for this scroll event, unless one is
    /// already pending (multiple `scroll` events inside one frame collapse
    /// into one dispatch, matching real browser scroll-event coalescing).
    fn on_scroll(inner: Owned<ManagerInner>) {
        if inner.with(|i| i.raf_registration.is_some()) {
            return;
        }
        let runtime = inner.with(|i| i.runtime.clone());
        let weak = inner.downgrade();
        let registration = with_frame_millis(&runtime, move |_frame_time_ms| {
            if let Some(inner) = weak.upgrade() {
                Self::run_dispatch(inner);
            }
        });
        inner.update(|i| i.raf_registration = Some(registration));
    }

    /// Runs registrations in priority order (ties broken by insertion
    /// order) starting at `resume_at`, stopping once `frame_budget_ms` has
    /// elapsed. Anything left over is picked up by another scheduled frame
    /// rather than waiting for the next real scroll event (§4.17's "yield
    /// remaining callbacks to the next frame").
    fn run_dispatch(inner: Owned<ManagerInner>) {
        inner.update(|i| i.raf_registration = None);

        let (mut sorted, resume_at, budget_ms, runtime) = inner.with(|i| {
            let mut sorted = i.registrations.clone();
            sorted.sort_by(|a, b| a.priority.cmp(&b.priority));
            (sorted, i.resume_at, i.frame_budget_ms, i.runtime.clone())
        });

        let start_ms = runtime.now_millis();
        let mut index = resume_at.min(sorted.len());
        while index < sorted.len() {
            (sorted[index].callback)();
            index += 1;
            if runtime.now_millis() - start_ms >= budget_ms {
                break;
            }
        }
        let total = sorted.len();
        sorted.clear();

        if index >= total {
            inner.update(|i| i.resume_at = 0);
        } else {
            inner.update(|i| i.resume_at = index);
            Self::on_scroll(inner);
        }
    }

    /// Tears the manager down entirely: cancels any pending RAF and removes
    /// the window listener. Used when the host that owns this manager
    /// unmounts; individual slots should call `deregister` instead.
    pub fn teardown(&self) {
        self.inner.update(|i| {
            i.raf_registration = None;
            i.registrations.clear();
        });
        self.remove_listener();
    }
}

#[cfg(test)]
#[path = "tests/manager_tests.rs"]
mod tests;
