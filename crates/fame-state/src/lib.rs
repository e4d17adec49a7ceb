//! Animation State Store (C10): per-slot progress, status, active-animation
//! cleanup, and event-driven completion waiting.

mod store;

pub use store::{AnimationStateStore, AnimationStatus, CompletionWaiter};
