//! Shared test harness for every FAME crate: `FakeDocument`/`FakeElement`
//! (the `fame-dom` host traits, without a browser) and `ManualRuntime` (the
//! `fame-core` platform traits, advanced by hand instead of by real timers).

mod fake_dom;
mod manual_runtime;

pub use fake_dom::{FakeDocument, FakeElement};
pub use manual_runtime::ManualRuntime;
