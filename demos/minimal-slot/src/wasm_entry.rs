//! The page's bootstrap script loads this `cdylib` and calls `start()` once
//! the DOM is ready. Looks up `#fame-demo-root` (expected to already contain
//! its three children in the page's own markup — this crate only wires
//! behavior, it never builds layout) and binds the slot against it.

use std::rc::Rc;

use fame_dom::web::WebDocument;
use fame_dom::{Document, DocumentHandle};
use wasm_bindgen::prelude::*;

use crate::runtime_web::WebRuntime;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let web_document = WebDocument::from_window().ok_or_else(|| JsValue::from_str("no document on window"))?;
    let document: DocumentHandle = web_document;

    let root = document
        .element_by_id("fame-demo-root")
        .ok_or_else(|| JsValue::from_str("page is missing #fame-demo-root"))?;

    let runtime = WebRuntime::new(window);
    let bound = crate::demo::bind(document, runtime.handle(), root);
    // Leaked deliberately: this demo has no unmount path of its own, and the
    // page that embeds it owns the crate's whole lifetime.
    std::mem::forget(bound);

    log::info!("minimal-slot: bound the reveal slot to #fame-demo-root");
    Ok(())
}
