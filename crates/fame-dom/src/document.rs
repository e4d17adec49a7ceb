//! Host DOM traits (C21): the seam that lets every other FAME component
//! that touches the DOM — the Style Applicator, Element Finder, Dynamic
//! Element Registry, and (in `fame-scroll`) the scroll trackers — run
//! against either a real browser (`web::WebDocument`/`WebElement`, gated
//! behind the `web` feature) or `fame-testing`'s `FakeDocument`/`FakeElement`
//! in ordinary `cargo test`. Generalizes the `RuntimeScheduler`/`Clock`
//! platform-trait split used for frame scheduling in `fame-core` to DOM access.

use std::rc::Rc;

/// Axis-aligned bounding box in CSS pixels, matching `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Opaque id for a registered DOM or scroll listener, returned by
/// `add_event_listener`/`add_scroll_listener`/`resize_observe` and required
/// to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The environment the engine is currently mounted in (§6). FAME never
/// probes this itself — the host passes it in at slot-bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentMode {
    Canvas,
    Preview,
    #[default]
    Live,
}

/// A reference-counted handle to a host element. `Rc` rather than a bare
/// reference because elements are stored by id across frames (C8) and
/// shared between the finder, registry, and applicator.
pub type ElementHandle = Rc<dyn Element>;

/// A reference-counted handle to a host document, held by components that
/// outlive a single call (`fame-scroll`'s Unified Scroll Manager and
/// Direction Detector register a listener once and must re-deregister it
/// later), as opposed to the per-call `&dyn Document` borrow everything
/// else in this crate takes.
pub type DocumentHandle = Rc<dyn Document>;

/// One DOM element, abstracted over the real browser and the fake test
/// double. Every method here is the minimal primitive another C-component
/// needs; nothing here does interpretation (that's C6/C7/C8's job).
pub trait Element {
    /// Stable identity for this *handle*, used to key per-element caches
    /// (the Style Applicator's transform/dimension caches). Two handles to
    /// the same logical node return the same id only if they are the same
    /// `Rc` allocation — per C8, animation code must re-resolve by
    /// `data-fame-element-id`, never hold a handle across a re-split.
    fn identity(&self) -> usize;

    /// Downcasting escape hatch for backend-specific code that needs the
    /// concrete type behind a trait object (e.g. `WebDocument::resize_observe`
    /// handing a raw node to `ResizeObserver::observe`).
    fn as_any(&self) -> &dyn std::any::Any;

    fn tag_name(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Whether this element matches a CSS selector (`Element.matches()`).
    fn matches(&self, selector: &str) -> bool;

    fn bounding_client_rect(&self) -> Rect;

    /// The element's current inline `style` attribute text, used by the
    /// Style Applicator to preserve unrelated inline styles when it
    /// recomposes a single `cssText` write (§4.6).
    fn inline_style_css_text(&self) -> String;

    fn set_inline_style_css_text(&self, css: &str);

    fn parent(&self) -> Option<ElementHandle>;

    /// Direct children, in document order.
    fn children(&self) -> Vec<ElementHandle>;

    /// Registers a listener for a bare event name (`"click"`, `"mouseover"`,
    /// …). Returns an id to deregister with `remove_event_listener`.
    fn add_event_listener(&self, event: &str, callback: Box<dyn Fn()>) -> ListenerId;

    fn remove_event_listener(&self, event: &str, id: ListenerId);

    /// The element's own text, ignoring markup (`Node.textContent`). Used by
    /// the Text Splitter (`fame-text`) to capture a container's plain text
    /// before tearing its children down.
    fn text_content(&self) -> String;

    fn set_text_content(&self, text: &str);

    /// Appends `child` as this element's last child (`Node.appendChild`).
    fn append_child_node(&self, child: &ElementHandle);

    /// Removes every direct child, leaving this element empty.
    fn remove_all_children(&self);
}

/// The document/window surface the Element Finder (`Document` scope),
/// Dynamic Element Registry (id lookups), and `fame-scroll` (scroll
/// position, resize observation) need.
pub trait Document {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementHandle>;

    fn element_by_id(&self, id: &str) -> Option<ElementHandle>;

    fn scroll_y(&self) -> f64;

    fn viewport_width(&self) -> f64;

    fn viewport_height(&self) -> f64;

    /// Registers the single passive window `scroll` listener a caller needs
    /// (the Unified Scroll Manager registers exactly one; the Scroll
    /// Direction Detector registers its own, per §4.18's "isolated from
    /// C17" note).
    fn add_scroll_listener(&self, callback: Box<dyn Fn()>) -> ListenerId;

    fn remove_scroll_listener(&self, id: ListenerId);

    /// Observes `element` for size changes via `ResizeObserver`. This is the
    /// only DOM-mutation-free invalidation source the cache discipline in
    /// §9 permits for scroll-hot-path caches.
    fn resize_observe(&self, element: &ElementHandle, callback: Box<dyn Fn()>) -> ListenerId;

    fn unobserve_resize(&self, id: ListenerId);

    /// Creates a detached element with the given tag name (`document.createElement`),
    /// used by the Text Splitter to build wrapper spans.
    fn create_element(&self, tag: &str) -> ElementHandle;

    /// Measures the bounding rect of `text[start_byte..end_byte]` within
    /// `container`'s (single, pre-split) text node, via `Range.setStart`/
    /// `setEnd`/`getBoundingClientRect` in the real DOM. Used by the Text
    /// Splitter (C9) to bucket grapheme clusters into lines before it tears
    /// the container's children down and rebuilds them as wrappers. `text`
    /// is the caller's already-captured plain text, not re-read from the
    /// live node, since by the time later ranges are measured the node may
    /// already be mid-rebuild.
    fn measure_text_range(&self, container: &ElementHandle, text: &str, start_byte: usize, end_byte: usize) -> Rect;
}
