//! Top-level `interpolate` entry point (C1's public contract).
//!
//! Signature intentionally omits `element`/`axis`: cross-unit pairs never
//! resolve here — they emit the deferred `CROSS_UNIT_INTERPOLATION:` marker
//! and `fame-dom`'s Style Applicator resolves it against live geometry, per
//! §4.1's "do not resolve at compile time" rule.

use crate::clip_path::interpolate_clip_path;
use crate::gradient::interpolate_gradient;
use crate::value::PropertyValue;

/// Marker prefix the Style Applicator watches for. The three fields after it
/// are the `from` and `to` CSS strings and the already-eased progress.
pub const CROSS_UNIT_MARKER_PREFIX: &str = "CROSS_UNIT_INTERPOLATION";

/// Interpolates `from` toward `to` at eased progress `t ∈ [0, 1]`, returning
/// the CSS string to assign (or a deferred cross-unit marker).
pub fn interpolate(from: &PropertyValue, to: &PropertyValue, t: f32) -> String {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (PropertyValue::Number(a, ua), PropertyValue::Number(b, ub)) if ua == ub => {
            crate::value::format_number(a + (b - a) * t as f64, *ua)
        }
        (PropertyValue::Number(..), PropertyValue::Number(..)) => cross_unit_marker(from, to, t),
        (PropertyValue::Color(a), PropertyValue::Color(b)) => a.lerp(b, t).to_css_string(),
        (PropertyValue::Gradient(a), PropertyValue::Gradient(b)) => match interpolate_gradient(a, b, t) {
            Some(css) => css,
            None => {
                log::warn!("gradient shape mismatch, stepping at t={t}");
                step(from, to, t)
            }
        },
        (PropertyValue::ClipPath(a), PropertyValue::ClipPath(b)) => match interpolate_clip_path(a, b, t) {
            Some(css) => css,
            None => {
                log::warn!("clip-path shape mismatch, stepping at t={t}");
                step(from, to, t)
            }
        },
        (PropertyValue::Keyword(a), PropertyValue::Keyword(b)) if a == b => a.clone(),
        (PropertyValue::Raw(_), _) | (_, PropertyValue::Raw(_)) => cross_unit_marker(from, to, t),
        _ => step(from, to, t),
    }
}

fn cross_unit_marker(from: &PropertyValue, to: &PropertyValue, t: f32) -> String {
    format!(
        "{CROSS_UNIT_MARKER_PREFIX}:{}:{}:{t}",
        from.to_css_string(),
        to.to_css_string()
    )
}

/// Step interpolation: the `from` value until the halfway point, then `to`.
/// Used for unparseable colors/gradients/clip-paths and for mismatched
/// keyword pairs (`cover` vs `contain`), matching the error-table contract
/// ("unparseable color/gradient/clip-path → step-interpolate; no throw").
fn step(from: &PropertyValue, to: &PropertyValue, t: f32) -> String {
    if t < 0.5 {
        from.to_css_string()
    } else {
        to.to_css_string()
    }
}

#[cfg(test)]
#[path = "tests/interpolate_tests.rs"]
mod tests;
