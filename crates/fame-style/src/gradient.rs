//! Gradient parsing and pairwise color-stop interpolation (C1).

use serde::{Deserialize, Serialize};

use crate::color::{parse_color, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GradientKind {
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    fn prefix(&self) -> &'static str {
        match self {
            GradientKind::Linear => "linear-gradient",
            GradientKind::Radial => "radial-gradient",
            GradientKind::Conic => "conic-gradient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Rgba,
    /// Stop position as a percent (`0.0..=100.0`), if one was given.
    pub position_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    /// The angle/shape descriptor (`"180deg"`, `"to right"`, `"circle at center"`),
    /// kept verbatim since its grammar varies per kind and FAME never computes it.
    pub heading: String,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn to_css_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.stops.len() + 1);
        if !self.heading.is_empty() {
            parts.push(self.heading.clone());
        }
        for stop in &self.stops {
            let mut s = stop.color.to_css_string();
            if let Some(pct) = stop.position_pct {
                s.push(' ');
                s.push_str(&format!("{}%", pct));
            }
            parts.push(s);
        }
        format!("{}({})", self.kind.prefix(), parts.join(", "))
    }
}

pub fn parse_gradient(raw: &str) -> Option<Gradient> {
    let (kind, inner) = if let Some(inner) = raw.strip_prefix("linear-gradient(").and_then(|v| v.strip_suffix(')')) {
        (GradientKind::Linear, inner)
    } else if let Some(inner) = raw.strip_prefix("radial-gradient(").and_then(|v| v.strip_suffix(')')) {
        (GradientKind::Radial, inner)
    } else if let Some(inner) = raw.strip_prefix("conic-gradient(").and_then(|v| v.strip_suffix(')')) {
        (GradientKind::Conic, inner)
    } else {
        return None;
    };

    let segments = split_top_level_commas(inner);
    if segments.is_empty() {
        return None;
    }

    let mut heading = String::new();
    let mut stop_segments = &segments[..];
    if let Some(first) = segments.first() {
        if parse_color(first.trim()).is_none() {
            heading = first.trim().to_string();
            stop_segments = &segments[1..];
        }
    }

    let mut stops = Vec::with_capacity(stop_segments.len());
    for seg in stop_segments {
        let seg = seg.trim();
        let (color_part, position_part) = match seg.rfind(' ') {
            Some(idx) if seg[idx + 1..].ends_with('%') => (&seg[..idx], Some(&seg[idx + 1..])),
            _ => (seg, None),
        };
        let color = parse_color(color_part)?;
        let position_pct = position_part.and_then(|p| p.trim_end_matches('%').parse::<f64>().ok());
        stops.push(ColorStop { color, position_pct });
    }
    if stops.is_empty() {
        return None;
    }

    Some(Gradient { kind, heading, stops })
}

fn split_top_level_commas(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in s.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                out.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        out.push(current);
    }
    out
}

/// Interpolates two gradients stop-for-stop when `kind` matches and both
/// have the same stop count; otherwise returns `None` so the caller steps
/// between the two raw CSS strings instead.
pub fn interpolate_gradient(from: &Gradient, to: &Gradient, t: f32) -> Option<String> {
    if from.kind != to.kind || from.stops.len() != to.stops.len() {
        return None;
    }
    let heading = if from.heading == to.heading {
        from.heading.clone()
    } else if t < 0.5 {
        from.heading.clone()
    } else {
        to.heading.clone()
    };
    let stops: Vec<ColorStop> = from
        .stops
        .iter()
        .zip(to.stops.iter())
        .map(|(a, b)| ColorStop {
            color: a.color.lerp(&b.color, t),
            position_pct: match (a.position_pct, b.position_pct) {
                (Some(pa), Some(pb)) => Some(pa + (pb - pa) * t as f64),
                (Some(pa), None) => Some(pa),
                (None, Some(pb)) => Some(pb),
                (None, None) => None,
            },
        })
        .collect();
    Some(Gradient { kind: from.kind, heading, stops }.to_css_string())
}

#[cfg(test)]
#[path = "tests/gradient_tests.rs"]
mod tests;
