//! Frame scheduling and single-threaded ownership primitives shared by every
//! FAME crate. This is the seam that lets the rest of the engine be driven
//! either by real browser timers (`wasm32-unknown-unknown`) or by the
//! deterministic fake clock in `fame-testing`.

pub mod config;
pub mod error;
pub mod frame_clock;
pub mod owned;
pub mod platform;
pub mod timer;

pub use config::FameConfig;
pub use error::FameError;
pub use frame_clock::{with_frame_millis, FrameCallbackRegistration, NextFrame};
pub use owned::{Owned, WeakOwned};
pub use platform::{Clock, FrameCallbackId, FrameScheduler, RuntimeHandle, TimerCallbackId, TimerScheduler};
pub use timer::{Delay, DelayHandle};

#[cfg(test)]
#[path = "tests/scheduling_tests.rs"]
mod tests;
