//! `web-sys`-backed `Document`/`Element` implementations, compiled only for
//! `wasm32-unknown-unknown` behind the `web` feature. This is the real
//! browser half of the C21 host-trait split; `fame-testing::FakeDocument`
//! is the other.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use rustc_hash::FxHashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{ResizeObserver, ResizeObserverEntry};

use crate::document::{Document, Element, ElementHandle, ListenerId, Rect};

/// Wraps a single `web_sys::Element`, keeping the JS-side event listener
/// closures alive for as long as the wrapper lives (dropping an element
/// handle drops its listeners with it).
pub struct WebElement {
    node: web_sys::Element,
    listeners: RefCell<FxHashMap<ListenerId, Closure<dyn FnMut(web_sys::Event)>>>,
    next_listener_id: RefCell<u64>,
}

impl WebElement {
    pub fn new(node: web_sys::Element) -> Rc<Self> {
        Rc::new(Self {
            node,
            listeners: RefCell::new(FxHashMap::default()),
            next_listener_id: RefCell::new(0),
        })
    }

    fn next_id(&self) -> ListenerId {
        let mut counter = self.next_listener_id.borrow_mut();
        *counter += 1;
        ListenerId(*counter)
    }
}

impl Element for WebElement {
    fn identity(&self) -> usize {
        self.node.clone().unchecked_into::<js_sys::Object>().as_ref() as *const _ as usize
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn tag_name(&self) -> String {
        self.node.tag_name()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.node.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.node.set_attribute(name, value);
    }

    fn matches(&self, selector: &str) -> bool {
        self.node.matches(selector).unwrap_or(false)
    }

    fn bounding_client_rect(&self) -> Rect {
        let rect = self.node.get_bounding_client_rect();
        Rect { x: rect.x(), y: rect.y(), width: rect.width(), height: rect.height() }
    }

    fn inline_style_css_text(&self) -> String {
        self.node
            .dyn_ref::<web_sys::HtmlElement>()
            .map(|el| el.style().css_text())
            .unwrap_or_default()
    }

    fn set_inline_style_css_text(&self, css: &str) {
        if let Some(el) = self.node.dyn_ref::<web_sys::HtmlElement>() {
            el.style().set_css_text(css);
        }
    }

    fn parent(&self) -> Option<ElementHandle> {
        self.node.parent_element().map(|p| WebElement::new(p) as ElementHandle)
    }

    fn children(&self) -> Vec<ElementHandle> {
        let collection = self.node.children();
        let mut out = Vec::with_capacity(collection.length() as usize);
        for i in 0..collection.length() {
            if let Some(child) = collection.item(i) {
                out.push(WebElement::new(child) as ElementHandle);
            }
        }
        out
    }

    fn add_event_listener(&self, event: &str, callback: Box<dyn Fn()>) -> ListenerId {
        let id = self.next_id();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| callback())
            as Box<dyn FnMut(web_sys::Event)>);
        let target: &web_sys::EventTarget = self.node.as_ref();
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_event_listener(&self, event: &str, id: ListenerId) {
        if let Some(closure) = self.listeners.borrow_mut().remove(&id) {
            let target: &web_sys::EventTarget = self.node.as_ref();
            let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }

    fn text_content(&self) -> String {
        let node: &web_sys::Node = self.node.as_ref();
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        let node: &web_sys::Node = self.node.as_ref();
        node.set_text_content(Some(text));
    }

    fn append_child_node(&self, child: &ElementHandle) {
        if let Some(web_child) = downcast_web_element(child) {
            let parent: &web_sys::Node = self.node.as_ref();
            let child_node: &web_sys::Node = web_child.node.as_ref();
            let _ = parent.append_child(child_node);
        }
    }

    fn remove_all_children(&self) {
        let node: &web_sys::Node = self.node.as_ref();
        while let Some(child) = node.first_child() {
            let _ = node.remove_child(&child);
        }
    }
}

/// The browser `window`/`document` pair.
pub struct WebDocument {
    document: web_sys::Document,
    window: web_sys::Window,
    scroll_listeners: RefCell<FxHashMap<ListenerId, Closure<dyn FnMut(web_sys::Event)>>>,
    resize_observers: RefCell<FxHashMap<ListenerId, (ResizeObserver, Closure<dyn FnMut(Array)>)>>,
    next_listener_id: RefCell<u64>,
}

impl WebDocument {
    pub fn from_window() -> Option<Rc<Self>> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Rc::new(Self {
            document,
            window,
            scroll_listeners: RefCell::new(FxHashMap::default()),
            resize_observers: RefCell::new(FxHashMap::default()),
            next_listener_id: RefCell::new(0),
        }))
    }

    fn next_id(&self) -> ListenerId {
        let mut counter = self.next_listener_id.borrow_mut();
        *counter += 1;
        ListenerId(*counter)
    }
}

impl Document for WebDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementHandle> {
        let Ok(list) = self.document.query_selector_all(selector) else { return Vec::new() };
        let mut out = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                    out.push(WebElement::new(element) as ElementHandle);
                }
            }
        }
        out
    }

    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.document.get_element_by_id(id).map(|el| WebElement::new(el) as ElementHandle)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }

    fn add_scroll_listener(&self, callback: Box<dyn Fn()>) -> ListenerId {
        let id = self.next_id();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| callback())
            as Box<dyn FnMut(web_sys::Event)>);
        let target: &web_sys::EventTarget = self.window.as_ref();
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(true);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            closure.as_ref().unchecked_ref(),
            &options,
        );
        self.scroll_listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_scroll_listener(&self, id: ListenerId) {
        if let Some(closure) = self.scroll_listeners.borrow_mut().remove(&id) {
            let target: &web_sys::EventTarget = self.window.as_ref();
            let _ = target.remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
    }

    fn resize_observe(&self, element: &ElementHandle, callback: Box<dyn Fn()>) -> ListenerId {
        let id = self.next_id();
        let closure = Closure::wrap(Box::new(move |_entries: Array| callback()) as Box<dyn FnMut(Array)>);
        let Ok(observer) = ResizeObserver::new(closure.as_ref().unchecked_ref()) else {
            return id;
        };
        if let Some(web_element) = downcast_web_element(element) {
            observer.observe(&web_element.node);
        }
        self.resize_observers.borrow_mut().insert(id, (observer, closure));
        id
    }

    fn unobserve_resize(&self, id: ListenerId) {
        if let Some((observer, _closure)) = self.resize_observers.borrow_mut().remove(&id) {
            observer.disconnect();
        }
    }

    fn create_element(&self, tag: &str) -> ElementHandle {
        let node = self.document.create_element(tag).unwrap_or_else(|_| {
            log::error!("document.createElement({tag:?}) failed; falling back to span");
            self.document.create_element("span").expect("span is always a valid tag name")
        });
        WebElement::new(node) as ElementHandle
    }

    fn measure_text_range(&self, container: &ElementHandle, text: &str, start_byte: usize, end_byte: usize) -> Rect {
        let Some(web_element) = downcast_web_element(container) else {
            return Rect::default();
        };
        let node: &web_sys::Node = web_element.node.as_ref();
        let Some(text_node) = node.first_child() else {
            return Rect::default();
        };
        // DOM ranges index text nodes in UTF-16 code units; `text` is the
        // splitter's own captured copy, so re-encode the byte offsets rather
        // than trust the live node (which may already differ mid-rebuild).
        let start_units = text[..start_byte].encode_utf16().count() as u32;
        let end_units = text[..end_byte].encode_utf16().count() as u32;
        let Ok(range) = self.document.create_range() else { return Rect::default() };
        if range.set_start(&text_node, start_units).is_err() || range.set_end(&text_node, end_units).is_err() {
            return Rect::default();
        }
        let rect = range.get_bounding_client_rect();
        Rect { x: rect.x(), y: rect.y(), width: rect.width(), height: rect.height() }
    }
}

fn downcast_web_element(element: &ElementHandle) -> Option<&WebElement> {
    // FAME only ever constructs `WebElement` handles on the wasm target, so
    // this always succeeds there. A non-`WebElement` implementor passed into
    // `WebDocument::resize_observe` (which shouldn't happen in practice) is
    // simply not observed.
    element.as_any().downcast_ref::<WebElement>()
}

#[allow(dead_code)]
fn _assert_entry_type(_: &ResizeObserverEntry) {}
