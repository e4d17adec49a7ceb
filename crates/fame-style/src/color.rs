//! Color parsing and channel-wise interpolation (C1).
//!
//! Generalized from a `Color(f32, f32, f32, f32)` GPU-draw-call tuple struct
//! to a CSS-text color: channels stay `f32` in `[0, 1]` for lerp precision,
//! re-serialized to `u8` only at the `rgb()`/`rgba()` string boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(&self, other: &Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_css_string(&self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        if (self.a - 1.0).abs() < f32::EPSILON {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", trim_alpha(self.a))
        }
    }
}

fn trim_alpha(a: f32) -> String {
    let a = a.clamp(0.0, 1.0);
    let mut s = format!("{:.3}", a);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(...)`, `rgba(...)` and a small
/// set of named colors. Returns `None` on anything else — callers fall back
/// to step interpolation per the "unparseable color" error-table entry.
pub fn parse_color(raw: &str) -> Option<Rgba> {
    let s = raw.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(inner) = s.strip_prefix("rgba(").and_then(|v| v.strip_suffix(')')) {
        return parse_rgb_components(inner, true);
    }
    if let Some(inner) = s.strip_prefix("rgb(").and_then(|v| v.strip_suffix(')')) {
        return parse_rgb_components(inner, false);
    }
    named_color(s)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let expand = |c: char| -> Option<u8> {
        let v = c.to_digit(16)? as u8;
        Some(v * 16 + v)
    };
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            let r = expand(chars.next()?)?;
            let g = expand(chars.next()?)?;
            let b = expand(chars.next()?)?;
            Some(Rgba::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0))
        }
        6 | 8 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            let a = if hex.len() == 8 {
                u8::from_str_radix(hex.get(6..8)?, 16).ok()?
            } else {
                255
            };
            Some(Rgba::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0))
        }
        _ => None,
    }
}

fn parse_rgb_components(inner: &str, has_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = inner.split(|c| c == ',' || c == ' ' || c == '/').map(|p| p.trim()).filter(|p| !p.is_empty()).collect();
    let min_parts = if has_alpha { 4 } else { 3 };
    if parts.len() < min_parts {
        return None;
    }
    let channel = |p: &str| -> Option<f32> {
        if let Some(pct) = p.strip_suffix('%') {
            Some(pct.parse::<f32>().ok()? / 100.0)
        } else {
            Some(p.parse::<f32>().ok()? / 255.0)
        }
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if has_alpha {
        let p = parts[3];
        if let Some(pct) = p.strip_suffix('%') {
            pct.parse::<f32>().ok()? / 100.0
        } else {
            p.parse::<f32>().ok()?
        }
    } else {
        1.0
    };
    Some(Rgba::new(r, g, b, a))
}

fn named_color(s: &str) -> Option<Rgba> {
    let hex = match s {
        "transparent" => return Some(Rgba::new(0.0, 0.0, 0.0, 0.0)),
        "black" => "000000",
        "white" => "ffffff",
        "red" => "ff0000",
        "green" => "008000",
        "blue" => "0000ff",
        "yellow" => "ffff00",
        "orange" => "ffa500",
        "gray" | "grey" => "808080",
        "silver" => "c0c0c0",
        "purple" => "800080",
        "pink" => "ffc0cb",
        "cyan" | "aqua" => "00ffff",
        "magenta" | "fuchsia" => "ff00ff",
        "navy" => "000080",
        "teal" => "008080",
        "lime" => "00ff00",
        "maroon" => "800000",
        "olive" => "808000",
        _ => return None,
    };
    parse_hex(hex)
}

#[cfg(test)]
#[path = "tests/color_tests.rs"]
mod tests;
