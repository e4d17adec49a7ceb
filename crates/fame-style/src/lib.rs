//! Unit & Color Interpolators (C1): parses CSS text into typed
//! `PropertyValue`s and interpolates them — same-unit numeric lerp, color and
//! gradient channel lerp, matching-shape clip-path lerp, and a deferred
//! marker protocol for cross-unit pairs that only the Style Applicator
//! (`fame-dom`) can resolve against live element geometry.

pub mod clip_path;
pub mod color;
pub mod gradient;
pub mod interpolate;
pub mod value;

pub use clip_path::ClipPath;
pub use color::Rgba;
pub use gradient::Gradient;
pub use interpolate::{interpolate, CROSS_UNIT_MARKER_PREFIX};
pub use value::{PropertyValue, Unit};
