//! Headless smoke run: binds the same slot `wasm_entry.rs` binds in a
//! browser, but against `fame-testing`'s fake DOM, driven by a real
//! wall-clock loop instead of `requestAnimationFrame`. No browser needed —
//! `cargo run` prints every style write the reveal slot makes.

use std::time::Instant;

use fame_dom::DocumentHandle;
use fame_testing::{FakeDocument, FakeElement, ManualRuntime};

const RUN_FOR_MS: f64 = 1500.0;
const FRAME_INTERVAL_MS: u64 = 16;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let document = FakeDocument::new();
    let root = FakeElement::new("div").with_id("fame-demo-root");
    document.register(&root);

    let children: Vec<FakeElement> = ["a", "b", "c"]
        .iter()
        .map(|id| {
            let child = FakeElement::new("span").with_id(id);
            root.append_child(&child);
            document.register(&child);
            child
        })
        .collect();

    let runtime = ManualRuntime::new();
    let document_handle: DocumentHandle = std::rc::Rc::new(document.clone());
    let bound = minimal_slot::demo::bind(document_handle, runtime.handle(), root.handle());

    log::info!("minimal-slot: clicking #fame-demo-root to start the reveal");
    root.fire_event("click");

    let started_at = Instant::now();
    loop {
        let elapsed_ms = started_at.elapsed().as_millis() as f64;
        runtime.advance_frame(elapsed_ms);
        runtime.advance_millis(0.0);

        for (id, child) in ["a", "b", "c"].iter().zip(children.iter()) {
            log::info!("{id}: {}", child.style_text());
        }

        if elapsed_ms >= RUN_FOR_MS && runtime.pending_frame_count() == 0 && runtime.pending_timer_count() == 0 {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(FRAME_INTERVAL_MS));
    }

    log::info!("minimal-slot: final progress = {}", bound.progress());
    bound.unbind();
}
