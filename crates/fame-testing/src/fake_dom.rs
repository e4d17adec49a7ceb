//! `FakeDocument`/`FakeElement`: the in-memory `Document`/`Element`
//! implementation every FAME crate tests against instead of a real browser.
//! Element identity, attributes, inline style, geometry, and a minimal
//! selector matcher (`tag`, `#id`, `.class`, `[attr]`/`[attr="value"]`,
//! `*`) are all mutable test fixtures the test author drives directly.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fame_dom::{Document, Element, ElementHandle, ListenerId, Rect};
use rustc_hash::FxHashMap;

/// Default fixture text measurer: lays out `text` as if every grapheme byte
/// were a fixed-width monospace cell on a single unwrapped line. Good enough
/// for word/character split tests; line-wrapping tests override it via
/// `FakeDocument::set_text_measurer` to place a line break at a chosen offset.
fn default_text_measurer(text: &str, start_byte: usize, end_byte: usize) -> Rect {
    const CHAR_WIDTH: f64 = 8.0;
    const LINE_HEIGHT: f64 = 20.0;
    let chars_before = text[..start_byte].chars().count() as f64;
    let span_chars = text[start_byte..end_byte].chars().count().max(1) as f64;
    Rect { x: chars_before * CHAR_WIDTH, y: 0.0, width: span_chars * CHAR_WIDTH, height: LINE_HEIGHT }
}

struct FakeElementInner {
    tag: String,
    attributes: FxHashMap<String, String>,
    style: String,
    rect: Rect,
    text: String,
    parent: Option<Weak<RefCell<FakeElementInner>>>,
    children: Vec<FakeElement>,
    listeners: Vec<(String, u64, Rc<dyn Fn()>)>,
    next_listener_id: u64,
}

/// A cheaply-cloned handle to a fake element. Clones share the same
/// underlying node, matching the real DOM's single-node-many-references
/// shape.
#[derive(Clone)]
pub struct FakeElement(Rc<RefCell<FakeElementInner>>);

impl FakeElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(FakeElementInner {
            tag: tag.into(),
            attributes: FxHashMap::default(),
            style: String::new(),
            rect: Rect::default(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        })))
    }

    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.borrow_mut().attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attribute("id", id)
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attribute("class", class)
    }

    pub fn with_rect(self, rect: Rect) -> Self {
        self.0.borrow_mut().rect = rect;
        self
    }

    pub fn set_rect(&self, rect: Rect) {
        self.0.borrow_mut().rect = rect;
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.0.borrow_mut().text = text.into();
        self
    }

    /// Appends `child` to this element's children and sets its parent link.
    /// Test-fixture helper; `Element::append_child_node` is the trait-object
    /// equivalent non-test code goes through.
    pub fn append_child(&self, child: &FakeElement) {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn style_text(&self) -> String {
        self.0.borrow().style.clone()
    }

    /// Invokes every listener registered for `event` on this element, in
    /// registration order.
    pub fn fire_event(&self, event: &str) {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|(name, _, _)| name == event)
            .map(|(_, _, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn handle(&self) -> ElementHandle {
        Rc::new(self.clone())
    }

    fn class_list(&self) -> Vec<String> {
        self.0
            .borrow()
            .attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl Element for FakeElement {
    fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.borrow_mut().attributes.insert(name.to_string(), value.to_string());
    }

    fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if selector == "*" {
            return true;
        }
        if let Some(id) = selector.strip_prefix('#') {
            return self.attribute("id").as_deref() == Some(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self.class_list().iter().any(|c| c == class);
        }
        if selector.starts_with('[') && selector.ends_with(']') {
            let inner = &selector[1..selector.len() - 1];
            return match inner.split_once('=') {
                Some((attr, value)) => {
                    let value = value.trim_matches('"').trim_matches('\'');
                    self.attribute(attr.trim()).as_deref() == Some(value)
                }
                None => self.attribute(inner.trim()).is_some(),
            };
        }
        self.tag_name().eq_ignore_ascii_case(selector)
    }

    fn bounding_client_rect(&self) -> Rect {
        self.0.borrow().rect
    }

    fn inline_style_css_text(&self) -> String {
        self.0.borrow().style.clone()
    }

    fn set_inline_style_css_text(&self, css: &str) {
        self.0.borrow_mut().style = css.to_string();
    }

    fn parent(&self) -> Option<ElementHandle> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Rc::new(FakeElement(inner)) as ElementHandle)
    }

    fn children(&self) -> Vec<ElementHandle> {
        self.0.borrow().children.iter().map(FakeElement::handle).collect()
    }

    fn add_event_listener(&self, event: &str, callback: Box<dyn Fn()>) -> ListenerId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((event.to_string(), id, Rc::from(callback)));
        ListenerId(id)
    }

    fn remove_event_listener(&self, event: &str, id: ListenerId) {
        self.0
            .borrow_mut()
            .listeners
            .retain(|(name, listener_id, _)| !(name == event && *listener_id == id.0));
    }

    fn text_content(&self) -> String {
        let inner = self.0.borrow();
        if !inner.children.is_empty() {
            inner.children.iter().map(FakeElement::text_content).collect()
        } else {
            inner.text.clone()
        }
    }

    fn set_text_content(&self, text: &str) {
        let mut inner = self.0.borrow_mut();
        inner.children.clear();
        inner.text = text.to_string();
    }

    fn append_child_node(&self, child: &ElementHandle) {
        if let Some(fake_child) = child.as_any().downcast_ref::<FakeElement>() {
            self.append_child(fake_child);
        } else {
            log::warn!("FakeDocument: appended a non-FakeElement child, ignoring");
        }
    }

    fn remove_all_children(&self) {
        self.0.borrow_mut().children.clear();
    }
}

struct FakeDocumentInner {
    by_id: FxHashMap<String, FakeElement>,
    all: Vec<FakeElement>,
    scroll_y: f64,
    viewport_width: f64,
    viewport_height: f64,
    scroll_listeners: Vec<(u64, Rc<dyn Fn()>)>,
    resize_observers: Vec<(u64, usize, Rc<dyn Fn()>)>,
    next_listener_id: u64,
    text_measurer: Rc<dyn Fn(&str, usize, usize) -> Rect>,
}

/// A flat registry of `FakeElement`s standing in for a whole document.
/// Test authors `register` every element they want `query_selector_all`,
/// `element_by_id`, and scroll/resize simulation to see.
#[derive(Clone)]
pub struct FakeDocument(Rc<RefCell<FakeDocumentInner>>);

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDocument {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(FakeDocumentInner {
            by_id: FxHashMap::default(),
            all: Vec::new(),
            scroll_y: 0.0,
            viewport_width: 1000.0,
            viewport_height: 800.0,
            scroll_listeners: Vec::new(),
            resize_observers: Vec::new(),
            next_listener_id: 0,
            text_measurer: Rc::new(default_text_measurer),
        })))
    }

    /// Overrides the fixture text measurer, e.g. to simulate a line break
    /// at a given byte offset for Text Splitter line-grouping tests.
    pub fn set_text_measurer(&self, measurer: impl Fn(&str, usize, usize) -> Rect + 'static) {
        self.0.borrow_mut().text_measurer = Rc::new(measurer);
    }

    /// Registers `element` (and, transitively, every descendant already
    /// attached to it) so it's visible to `query_selector_all`/`element_by_id`.
    pub fn register(&self, element: &FakeElement) {
        let mut inner = self.0.borrow_mut();
        if let Some(id) = element.attribute("id") {
            inner.by_id.insert(id, element.clone());
        }
        inner.all.push(element.clone());
        drop(inner);
        for child in element.children() {
            if let Some(fake_child) = child.as_any().downcast_ref::<FakeElement>() {
                self.register(fake_child);
            }
        }
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        let mut inner = self.0.borrow_mut();
        inner.viewport_width = width;
        inner.viewport_height = height;
    }

    /// Sets scroll position directly without notifying listeners (use
    /// `scroll_to` to additionally fire the registered scroll listeners).
    pub fn set_scroll_y(&self, y: f64) {
        self.0.borrow_mut().scroll_y = y;
    }

    /// Sets scroll position and fires every registered scroll listener,
    /// simulating a real `scroll` event.
    pub fn scroll_to(&self, y: f64) {
        self.set_scroll_y(y);
        let listeners: Vec<Rc<dyn Fn()>> =
            self.0.borrow().scroll_listeners.iter().map(|(_, cb)| cb.clone()).collect();
        for callback in listeners {
            callback();
        }
    }

    /// Fires every resize observer registered against `element`.
    pub fn fire_resize(&self, element: &FakeElement) {
        let identity = element.identity();
        let listeners: Vec<Rc<dyn Fn()>> = self
            .0
            .borrow()
            .resize_observers
            .iter()
            .filter(|(_, target, _)| *target == identity)
            .map(|(_, _, cb)| cb.clone())
            .collect();
        for callback in listeners {
            callback();
        }
    }
}

impl Document for FakeDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementHandle> {
        self.0
            .borrow()
            .all
            .iter()
            .filter(|el| el.matches(selector))
            .map(FakeElement::handle)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.0.borrow().by_id.get(id).map(FakeElement::handle)
    }

    fn scroll_y(&self) -> f64 {
        self.0.borrow().scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.0.borrow().viewport_width
    }

    fn viewport_height(&self) -> f64 {
        self.0.borrow().viewport_height
    }

    fn add_scroll_listener(&self, callback: Box<dyn Fn()>) -> ListenerId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.scroll_listeners.push((id, Rc::from(callback)));
        ListenerId(id)
    }

    fn remove_scroll_listener(&self, id: ListenerId) {
        self.0.borrow_mut().scroll_listeners.retain(|(listener_id, _)| *listener_id != id.0);
    }

    fn resize_observe(&self, element: &ElementHandle, callback: Box<dyn Fn()>) -> ListenerId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.resize_observers.push((id, element.identity(), Rc::from(callback)));
        ListenerId(id)
    }

    fn unobserve_resize(&self, id: ListenerId) {
        self.0.borrow_mut().resize_observers.retain(|(listener_id, _, _)| *listener_id != id.0);
    }

    fn create_element(&self, tag: &str) -> ElementHandle {
        FakeElement::new(tag).handle()
    }

    fn measure_text_range(&self, _container: &ElementHandle, text: &str, start_byte: usize, end_byte: usize) -> Rect {
        (self.0.borrow().text_measurer)(text, start_byte, end_byte)
    }
}
