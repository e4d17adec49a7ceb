//! Smallest possible host of the FAME engine: one [`fame_engine::AnimationSlot`]
//! bound against a real document. Builds two ways, in the same shape as a
//! `[lib] crate-type = ["cdylib", "rlib"]` app with a feature-gated binary:
//! a native binary (`src/main.rs`) that drives
//! the slot against `fame-testing`'s fake DOM on a real wall-clock loop, with
//! no browser required, and a `cdylib` (this crate, behind the `web`
//! feature) that a page loads to drive the same slot against a real
//! `fame_dom::web::WebDocument`.

pub mod demo;

#[cfg(feature = "web")]
mod runtime_web;

#[cfg(feature = "web")]
mod wasm_entry;
