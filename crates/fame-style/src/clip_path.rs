//! `clip-path` shape parsing and matching-shape interpolation (C1).

use serde::{Deserialize, Serialize};

/// A single numeric clip-path component (`10px`, `50%`). Interpolated
/// numerically regardless of matching units — `clip-path` components rarely
/// mix units within one shape, and when they do the result is still a
/// reasonable length since both sides feed the same CSS `<length-percentage>`
/// slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipLength {
    pub value: f64,
    pub unit: String,
}

impl ClipLength {
    fn lerp(&self, other: &ClipLength, t: f32) -> ClipLength {
        ClipLength {
            value: self.value + (other.value - self.value) * t as f64,
            unit: self.unit.clone(),
        }
    }

    fn to_css(&self) -> String {
        format!("{}{}", trim(self.value), self.unit)
    }
}

fn trim(v: f64) -> String {
    if v.fract().abs() < 1e-9 {
        format!("{}", v as i64)
    } else {
        format!("{:.3}", v)
    }
}

fn parse_length(s: &str) -> Option<ClipLength> {
    let s = s.trim();
    let split_at = s.find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')?;
    let (num, unit) = s.split_at(split_at);
    Some(ClipLength {
        value: num.parse().ok()?,
        unit: unit.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClipPath {
    Inset { top: ClipLength, right: ClipLength, bottom: ClipLength, left: ClipLength, round: Option<String> },
    Circle { radius: ClipLength, position: String },
    Ellipse { rx: ClipLength, ry: ClipLength, position: String },
    Polygon { points: Vec<(ClipLength, ClipLength)> },
}

impl ClipPath {
    pub fn to_css_string(&self) -> String {
        match self {
            ClipPath::Inset { top, right, bottom, left, round } => {
                let mut s = format!("inset({} {} {} {}", top.to_css(), right.to_css(), bottom.to_css(), left.to_css());
                if let Some(r) = round {
                    s.push_str(&format!(" round {r}"));
                }
                s.push(')');
                s
            }
            ClipPath::Circle { radius, position } => format!("circle({} at {})", radius.to_css(), position),
            ClipPath::Ellipse { rx, ry, position } => format!("ellipse({} {} at {})", rx.to_css(), ry.to_css(), position),
            ClipPath::Polygon { points } => {
                let pts: Vec<String> = points.iter().map(|(x, y)| format!("{} {}", x.to_css(), y.to_css())).collect();
                format!("polygon({})", pts.join(", "))
            }
        }
    }
}

pub fn parse_clip_path(raw: &str) -> Option<ClipPath> {
    if let Some(inner) = raw.strip_prefix("inset(").and_then(|v| v.strip_suffix(')')) {
        let (dims, round) = match inner.split_once(" round ") {
            Some((d, r)) => (d, Some(r.trim().to_string())),
            None => (inner, None),
        };
        let parts: Vec<&str> = dims.split_whitespace().collect();
        let lens: Vec<ClipLength> = parts.iter().filter_map(|p| parse_length(p)).collect();
        return match lens.len() {
            1 => Some(ClipPath::Inset { top: lens[0].clone(), right: lens[0].clone(), bottom: lens[0].clone(), left: lens[0].clone(), round }),
            2 => Some(ClipPath::Inset { top: lens[0].clone(), bottom: lens[0].clone(), right: lens[1].clone(), left: lens[1].clone(), round }),
            4 => Some(ClipPath::Inset { top: lens[0].clone(), right: lens[1].clone(), bottom: lens[2].clone(), left: lens[3].clone(), round }),
            _ => None,
        };
    }
    if let Some(inner) = raw.strip_prefix("circle(").and_then(|v| v.strip_suffix(')')) {
        let (radius_part, position) = split_at_keyword(inner);
        return Some(ClipPath::Circle { radius: parse_length(radius_part.trim())?, position });
    }
    if let Some(inner) = raw.strip_prefix("ellipse(").and_then(|v| v.strip_suffix(')')) {
        let (dims, position) = split_at_keyword(inner);
        let parts: Vec<&str> = dims.split_whitespace().collect();
        if parts.len() != 2 {
            return None;
        }
        return Some(ClipPath::Ellipse { rx: parse_length(parts[0])?, ry: parse_length(parts[1])?, position });
    }
    if let Some(inner) = raw.strip_prefix("polygon(").and_then(|v| v.strip_suffix(')')) {
        let mut points = Vec::new();
        for pair in inner.split(',') {
            let parts: Vec<&str> = pair.trim().split_whitespace().collect();
            if parts.len() != 2 {
                return None;
            }
            points.push((parse_length(parts[0])?, parse_length(parts[1])?));
        }
        return Some(ClipPath::Polygon { points });
    }
    None
}

fn split_at_keyword(s: &str) -> (&str, String) {
    match s.find(" at ") {
        Some(idx) => (&s[..idx], s[idx + 4..].trim().to_string()),
        None => (s, "center".to_string()),
    }
}

/// Interpolates two clip-paths of matching shape (and matching point count
/// for `polygon`). Returns `None` when shapes differ, so the caller steps
/// between the raw CSS strings instead.
pub fn interpolate_clip_path(from: &ClipPath, to: &ClipPath, t: f32) -> Option<String> {
    match (from, to) {
        (
            ClipPath::Inset { top: t1, right: r1, bottom: b1, left: l1, round: rd1 },
            ClipPath::Inset { top: t2, right: r2, bottom: b2, left: l2, round: rd2 },
        ) => Some(
            ClipPath::Inset {
                top: t1.lerp(t2, t),
                right: r1.lerp(r2, t),
                bottom: b1.lerp(b2, t),
                left: l1.lerp(l2, t),
                round: if t < 0.5 { rd1.clone() } else { rd2.clone() },
            }
            .to_css_string(),
        ),
        (ClipPath::Circle { radius: ra, position: pa }, ClipPath::Circle { radius: rb, position: pb }) => Some(
            ClipPath::Circle {
                radius: ra.lerp(rb, t),
                position: if pa == pb { pa.clone() } else if t < 0.5 { pa.clone() } else { pb.clone() },
            }
            .to_css_string(),
        ),
        (
            ClipPath::Ellipse { rx: rxa, ry: rya, position: pa },
            ClipPath::Ellipse { rx: rxb, ry: ryb, position: pb },
        ) => Some(
            ClipPath::Ellipse {
                rx: rxa.lerp(rxb, t),
                ry: rya.lerp(ryb, t),
                position: if pa == pb { pa.clone() } else if t < 0.5 { pa.clone() } else { pb.clone() },
            }
            .to_css_string(),
        ),
        (ClipPath::Polygon { points: pa }, ClipPath::Polygon { points: pb }) if pa.len() == pb.len() => {
            let points = pa
                .iter()
                .zip(pb.iter())
                .map(|((xa, ya), (xb, yb))| (xa.lerp(xb, t), ya.lerp(yb, t)))
                .collect();
            Some(ClipPath::Polygon { points }.to_css_string())
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/clip_path_tests.rs"]
mod tests;
