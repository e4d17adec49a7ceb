//! `PropertyValue`: the typed CSS value FAME carries internally instead of
//! raw strings, per C1's "parse once at keyframe-insertion time" contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clip_path::ClipPath;
use crate::color::{parse_color, Rgba};
use crate::gradient::{parse_gradient, Gradient};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Unit {
    Px,
    Percent,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Em,
    Rem,
    Deg,
    Rad,
    Turn,
    /// No unit suffix at all (`opacity: 0.5`, `z-index: 3`).
    Unitless,
}

impl Unit {
    fn suffix(&self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Percent => "%",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Vmin => "vmin",
            Unit::Vmax => "vmax",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Deg => "deg",
            Unit::Rad => "rad",
            Unit::Turn => "turn",
            Unit::Unitless => "",
        }
    }

    fn parse_suffix(s: &str) -> (f64, Unit, bool) {
        const SUFFIXES: &[(&str, Unit)] = &[
            ("px", Unit::Px),
            ("%", Unit::Percent),
            ("vmin", Unit::Vmin),
            ("vmax", Unit::Vmax),
            ("vw", Unit::Vw),
            ("vh", Unit::Vh),
            ("rem", Unit::Rem),
            ("em", Unit::Em),
            ("deg", Unit::Deg),
            ("rad", Unit::Rad),
            ("turn", Unit::Turn),
        ];
        for (suffix, unit) in SUFFIXES {
            if let Some(num) = s.strip_suffix(suffix) {
                if let Ok(n) = num.trim().parse::<f64>() {
                    return (n, *unit, true);
                }
            }
        }
        if let Ok(n) = s.trim().parse::<f64>() {
            return (n, Unit::Unitless, true);
        }
        (0.0, Unit::Unitless, false)
    }
}

/// A parsed CSS value. Parsing happens once, at keyframe-insertion time, so
/// malformed input ("Invalid keyframe value" in the error table) is caught
/// in one place rather than on every per-frame sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64, Unit),
    Color(Rgba),
    Gradient(Gradient),
    ClipPath(ClipPath),
    /// A keyword value (`cover`, `contain`, `top`, `none`, …) that never
    /// numerically interpolates — only steps between endpoints.
    Keyword(String),
    /// Anything else, including `calc(...)` expressions: carried verbatim
    /// and always treated as cross-unit (never same-unit-lerped) because its
    /// numeric structure is opaque to FAME.
    Raw(String),
}

impl PropertyValue {
    pub fn parse(raw: &str) -> PropertyValue {
        let s = raw.trim();
        if s.is_empty() {
            return PropertyValue::Keyword(String::new());
        }
        if s.starts_with('#') || s.starts_with("rgb(") || s.starts_with("rgba(") {
            if let Some(color) = parse_color(s) {
                return PropertyValue::Color(color);
            }
        }
        if s.ends_with(')') && (s.starts_with("linear-gradient(") || s.starts_with("radial-gradient(") || s.starts_with("conic-gradient(")) {
            if let Some(gradient) = parse_gradient(s) {
                return PropertyValue::Gradient(gradient);
            }
        }
        if s.ends_with(')') && (s.starts_with("inset(") || s.starts_with("circle(") || s.starts_with("ellipse(") || s.starts_with("polygon(")) {
            if let Some(clip) = crate::clip_path::parse_clip_path(s) {
                return PropertyValue::ClipPath(clip);
            }
        }
        if s.contains("calc(") {
            return PropertyValue::Raw(s.to_string());
        }
        let (num, unit, ok) = Unit::parse_suffix(s);
        if ok {
            return PropertyValue::Number(num, unit);
        }
        PropertyValue::Keyword(s.to_string())
    }

    /// Re-serializes to the CSS text form the Style Applicator writes.
    pub fn to_css_string(&self) -> String {
        match self {
            PropertyValue::Number(n, unit) => format_number(*n, *unit),
            PropertyValue::Color(c) => c.to_css_string(),
            PropertyValue::Gradient(g) => g.to_css_string(),
            PropertyValue::ClipPath(c) => c.to_css_string(),
            PropertyValue::Keyword(k) => k.clone(),
            PropertyValue::Raw(r) => r.clone(),
        }
    }
}

pub fn format_number(n: f64, unit: Unit) -> String {
    format!("{}{}", trim_trailing_zeros(n), unit.suffix())
}

fn trim_trailing_zeros(n: f64) -> String {
    if n.fract().abs() < 1e-9 {
        format!("{}", n as i64)
    } else {
        let mut s = format!("{:.4}", n);
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        s
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_string())
    }
}

#[cfg(test)]
#[path = "tests/value_tests.rs"]
mod tests;
