//! Style Applicator (C6): writes `{property -> value}` maps to the DOM in a
//! single `cssText` write per frame, composing transform functions into one
//! `transform:` declaration and resolving deferred cross-unit markers
//! against live element/viewport geometry.
//!
//! Grounded in the retrieved `leptos-motion-dom` animation engine's
//! RAF-driven single-write-per-frame discipline, generalized here to a
//! multi-property batch rather than one scalar per property.

use std::rc::Rc;

use fame_core::platform::Clock;
use fame_style::{interpolate::CROSS_UNIT_MARKER_PREFIX, value::Unit, PropertyValue};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::document::{Document, ElementHandle};

/// Transform sub-properties, in the fixed emission order §4.6 names.
const TRANSFORM_PROPERTIES: &[&str] = &[
    "translateX",
    "translateY",
    "translateZ",
    "rotate",
    "rotateX",
    "rotateY",
    "rotateZ",
    "scale",
    "scaleX",
    "scaleY",
    "scaleZ",
    "skewX",
    "skewY",
];

/// Properties whose percentage/viewport cross-unit resolution should use
/// the element's *height* rather than its width. Anything not listed here
/// defaults to width, matching `axis ∈ {width, height}` in §4.1's contract.
const HEIGHT_AXIS_PROPERTIES: &[&str] = &[
    "translateY", "height", "top", "bottom", "marginTop", "marginBottom",
    "paddingTop", "paddingBottom",
];

const DIMENSION_CACHE_TTL_MS: f64 = 2000.0;

struct CachedDimensions {
    width: f64,
    height: f64,
    cached_at_ms: f64,
}

/// Per-element transform state, rebuilt into a single `transform:` string
/// on every write that touches a transform sub-property.
#[derive(Default, Clone)]
struct TransformMap {
    values: FxHashMap<&'static str, String>,
}

impl TransformMap {
    fn compose(&self) -> Option<String> {
        if self.values.is_empty() {
            return None;
        }
        let mut parts = Vec::with_capacity(self.values.len());
        for name in TRANSFORM_PROPERTIES {
            if let Some(value) = self.values.get(name) {
                parts.push(format!("{}({})", name, value));
            }
        }
        Some(parts.join(" "))
    }
}

/// Writes interpolated values to DOM elements, one `cssText` assignment per
/// `apply` call. Holds the per-element transform and dimension caches that
/// make repeated cross-unit and transform writes cheap.
pub struct StyleApplicator {
    clock: Rc<dyn Clock>,
    transforms: std::cell::RefCell<FxHashMap<usize, TransformMap>>,
    dimensions: std::cell::RefCell<FxHashMap<usize, CachedDimensions>>,
    viewport: std::cell::RefCell<Option<CachedDimensions>>,
    gpu_hinted: std::cell::RefCell<FxHashSet<usize>>,
}

impl StyleApplicator {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            transforms: Default::default(),
            dimensions: Default::default(),
            viewport: Default::default(),
            gpu_hinted: Default::default(),
        }
    }

    /// Drops every cached dimension, forcing the next cross-unit resolution
    /// to re-measure. A host wires this to `window.resize`, per §4.1's "no
    /// per-frame getComputedStyle... invalidated on window resize" rule.
    pub fn invalidate_dimension_cache(&self) {
        self.dimensions.borrow_mut().clear();
        *self.viewport.borrow_mut() = None;
    }

    /// Applies `values` (property name -> CSS string, possibly a deferred
    /// cross-unit marker) to `element` in one write.
    pub fn apply(
        &self,
        document: &dyn Document,
        element: &ElementHandle,
        values: &FxHashMap<String, String>,
    ) {
        let id = element.identity();
        let mut transform_dirty = false;
        let mut plain: Vec<(String, String)> = Vec::new();

        for (property, raw_value) in values {
            let resolved = self.resolve_value(document, element, property, raw_value);
            if TRANSFORM_PROPERTIES.contains(&property.as_str()) {
                self.transforms
                    .borrow_mut()
                    .entry(id)
                    .or_default()
                    .values
                    .insert(
                        TRANSFORM_PROPERTIES
                            .iter()
                            .find(|p| **p == property.as_str())
                            .copied()
                            .unwrap_or("translateX"),
                        resolved,
                    );
                transform_dirty = true;
            } else if property == "transform" {
                plain.push(("transform".to_string(), resolved));
            } else {
                plain.push((css_property_name(property), resolved));
            }
        }

        let transform_css = if transform_dirty {
            self.transforms.borrow().get(&id).and_then(TransformMap::compose)
        } else {
            None
        };

        let first_write = self.gpu_hinted.borrow_mut().insert(id);
        let needs_will_change = first_write && (transform_dirty || transform_css.is_some());

        let mut declarations = parse_css_text(&element.inline_style_css_text());
        for (property, value) in &plain {
            set_declaration(&mut declarations, property, value);
        }
        if let Some(transform_css) = &transform_css {
            set_declaration(&mut declarations, "transform", transform_css);
        }
        if needs_will_change && !declarations.iter().any(|(p, _)| p == "will-change") {
            declarations.push(("will-change".to_string(), "transform".to_string()));
        }

        element.set_inline_style_css_text(&serialize_css_text(&declarations));
    }

    fn resolve_value(
        &self,
        document: &dyn Document,
        element: &ElementHandle,
        property: &str,
        raw_value: &str,
    ) -> String {
        if !raw_value.starts_with(CROSS_UNIT_MARKER_PREFIX) {
            return raw_value.to_string();
        }
        let mut parts = raw_value.splitn(4, ':');
        let _tag = parts.next();
        let (Some(from), Some(to), Some(eased)) = (parts.next(), parts.next(), parts.next()) else {
            log::error!("malformed cross-unit marker {raw_value:?}");
            return "0px".to_string();
        };
        let eased: f32 = eased.parse().unwrap_or(0.0);

        let axis_is_height = HEIGHT_AXIS_PROPERTIES.contains(&property);
        let (element_w, element_h) = self.element_dimensions(element);
        let (viewport_w, viewport_h) = self.viewport_dimensions(document);
        let element_dim = if axis_is_height { element_h } else { element_w };
        let viewport_dim = if axis_is_height { viewport_h } else { viewport_w };

        let from_px = to_px(&PropertyValue::parse(from), element_dim, viewport_w, viewport_h);
        let to_px_value = to_px(&PropertyValue::parse(to), element_dim, viewport_w, viewport_h);
        let _ = viewport_dim; // kept for readability/symmetry with the axis split above
        let px = from_px + (to_px_value - from_px) * eased as f64;
        format!("{px}px")
    }

    fn element_dimensions(&self, element: &ElementHandle) -> (f64, f64) {
        let id = element.identity();
        let now = self.clock.now_millis();
        if let Some(cached) = self.dimensions.borrow().get(&id) {
            if now - cached.cached_at_ms <= DIMENSION_CACHE_TTL_MS {
                return (cached.width, cached.height);
            }
        }
        let rect = element.bounding_client_rect();
        self.dimensions.borrow_mut().insert(
            id,
            CachedDimensions { width: rect.width, height: rect.height, cached_at_ms: now },
        );
        (rect.width, rect.height)
    }

    fn viewport_dimensions(&self, document: &dyn Document) -> (f64, f64) {
        let now = self.clock.now_millis();
        if let Some(cached) = self.viewport.borrow().as_ref() {
            if now - cached.cached_at_ms <= DIMENSION_CACHE_TTL_MS {
                return (cached.width, cached.height);
            }
        }
        let width = document.viewport_width();
        let height = document.viewport_height();
        *self.viewport.borrow_mut() =
            Some(CachedDimensions { width, height, cached_at_ms: now });
        (width, height)
    }
}

/// Converts a parsed value to pixels against the relevant element/viewport
/// dimension. `calc(...)` endpoints are evaluated against the same geometry
/// a bare numeric endpoint would use; anything else unparseable (gradients,
/// keywords) falls back to `0px`, per the error table's "cross-unit
/// interpolation when element has zero size -> treat missing dimension as 0".
fn to_px(value: &PropertyValue, element_dim: f64, viewport_w: f64, viewport_h: f64) -> f64 {
    match value {
        PropertyValue::Number(n, unit) => numeric_to_px(*n, *unit, element_dim, viewport_w, viewport_h),
        PropertyValue::Raw(raw) => eval_calc(raw, element_dim, viewport_w, viewport_h).unwrap_or_else(|| {
            log::warn!("unresolvable calc() expression {raw:?}; treating as 0");
            0.0
        }),
        _ => {
            log::warn!("cross-unit interpolation endpoint {value:?} is not numeric; treating as 0");
            0.0
        }
    }
}

fn numeric_to_px(n: f64, unit: Unit, element_dim: f64, viewport_w: f64, viewport_h: f64) -> f64 {
    match unit {
        Unit::Px | Unit::Unitless => n,
        Unit::Percent => n / 100.0 * element_dim,
        Unit::Vw => n / 100.0 * viewport_w,
        Unit::Vh => n / 100.0 * viewport_h,
        Unit::Vmin => n / 100.0 * viewport_w.min(viewport_h),
        Unit::Vmax => n / 100.0 * viewport_w.max(viewport_h),
        Unit::Em | Unit::Rem => n * 16.0,
        Unit::Deg | Unit::Rad | Unit::Turn => n,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CalcToken {
    Number(f64, Unit),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Evaluates a `calc(...)` string to pixels. Supports the four arithmetic
/// operators, parens, and the same unit set `PropertyValue::Number` carries.
/// Returns `None` on anything the tokenizer/parser can't make sense of, so
/// the caller can fall back to 0 rather than panic on malformed input.
fn eval_calc(raw: &str, element_dim: f64, viewport_w: f64, viewport_h: f64) -> Option<f64> {
    let inner = raw.trim().strip_prefix("calc(")?.strip_suffix(')')?;
    let tokens = tokenize_calc(inner)?;
    let mut parser = CalcParser { tokens: &tokens, pos: 0, element_dim, viewport_w, viewport_h };
    let value = parser.parse_expr()?;
    if parser.pos != tokens.len() {
        return None;
    }
    Some(value)
}

fn tokenize_calc(s: &str) -> Option<Vec<CalcToken>> {
    let bytes: Vec<char> = s.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let ch = bytes[i];
        if ch.is_whitespace() {
            i += 1;
            continue;
        }
        match ch {
            '+' => {
                tokens.push(CalcToken::Plus);
                i += 1;
            }
            '*' => {
                tokens.push(CalcToken::Star);
                i += 1;
            }
            '/' => {
                tokens.push(CalcToken::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(CalcToken::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(CalcToken::RParen);
                i += 1;
            }
            '-' => {
                // A `-` is a binary operator after a number/`)`, otherwise it's
                // the sign of the number that follows.
                let is_binary = matches!(tokens.last(), Some(CalcToken::Number(..)) | Some(CalcToken::RParen));
                if is_binary {
                    tokens.push(CalcToken::Minus);
                    i += 1;
                } else {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_whitespace() {
                        i += 1;
                    }
                    let (num, consumed) = read_number_token(&bytes[i..])?;
                    let (n, unit) = num;
                    tokens.push(CalcToken::Number(-n, unit));
                    i += consumed;
                }
            }
            _ => {
                let (num, consumed) = read_number_token(&bytes[i..])?;
                let (n, unit) = num;
                tokens.push(CalcToken::Number(n, unit));
                i += consumed;
            }
        }
    }
    Some(tokens)
}

/// Reads a leading `<number><unit?>` token (e.g. `100%`, `2.5rem`, `10`) from
/// `chars`, returning the parsed value and how many chars it consumed.
fn read_number_token(chars: &[char]) -> Option<((f64, Unit), usize)> {
    let mut end = 0;
    while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
        end += 1;
    }
    if end == 0 {
        return None;
    }
    let digits: String = chars[..end].iter().collect();
    let n: f64 = digits.parse().ok()?;

    let mut unit_end = end;
    while unit_end < chars.len() && (chars[unit_end].is_ascii_alphabetic() || chars[unit_end] == '%') {
        unit_end += 1;
    }
    let suffix: String = chars[end..unit_end].iter().collect();
    let unit = match suffix.as_str() {
        "" => Unit::Unitless,
        "px" => Unit::Px,
        "%" => Unit::Percent,
        "vw" => Unit::Vw,
        "vh" => Unit::Vh,
        "vmin" => Unit::Vmin,
        "vmax" => Unit::Vmax,
        "em" => Unit::Em,
        "rem" => Unit::Rem,
        "deg" => Unit::Deg,
        "rad" => Unit::Rad,
        "turn" => Unit::Turn,
        _ => return None,
    };
    Some(((n, unit), unit_end))
}

struct CalcParser<'a> {
    tokens: &'a [CalcToken],
    pos: usize,
    element_dim: f64,
    viewport_w: f64,
    viewport_h: f64,
}

impl CalcParser<'_> {
    fn peek(&self) -> Option<&CalcToken> {
        self.tokens.get(self.pos)
    }

    fn to_px(&self, n: f64, unit: Unit) -> f64 {
        numeric_to_px(n, unit, self.element_dim, self.viewport_w, self.viewport_h)
    }

    /// `expr := term (('+' | '-') term)*`
    fn parse_expr(&mut self) -> Option<f64> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek() {
                Some(CalcToken::Plus) => {
                    self.pos += 1;
                    value += self.parse_term()?;
                }
                Some(CalcToken::Minus) => {
                    self.pos += 1;
                    value -= self.parse_term()?;
                }
                _ => return Some(value),
            }
        }
    }

    /// `term := factor (('*' | '/') factor)*`
    fn parse_term(&mut self) -> Option<f64> {
        let mut value = self.parse_factor()?;
        loop {
            match self.peek() {
                Some(CalcToken::Star) => {
                    self.pos += 1;
                    value *= self.parse_factor()?;
                }
                Some(CalcToken::Slash) => {
                    self.pos += 1;
                    let divisor = self.parse_factor()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value /= divisor;
                }
                _ => return Some(value),
            }
        }
    }

    /// `factor := number | '(' expr ')'`
    fn parse_factor(&mut self) -> Option<f64> {
        match self.tokens.get(self.pos)? {
            CalcToken::Number(n, unit) => {
                let px = self.to_px(*n, *unit);
                self.pos += 1;
                Some(px)
            }
            CalcToken::LParen => {
                self.pos += 1;
                let value = self.parse_expr()?;
                match self.tokens.get(self.pos) {
                    Some(CalcToken::RParen) => {
                        self.pos += 1;
                        Some(value)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Maps an internal camelCase transform-adjacent property name to the CSS
/// property name written to `style`. Most properties pass through
/// unchanged; this only exists for the handful FAME authors in camelCase.
fn css_property_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn parse_css_text(css: &str) -> Vec<(String, String)> {
    css.split(';')
        .filter_map(|decl| {
            let decl = decl.trim();
            if decl.is_empty() {
                return None;
            }
            let (prop, value) = decl.split_once(':')?;
            Some((prop.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn set_declaration(declarations: &mut Vec<(String, String)>, property: &str, value: &str) {
    if let Some(existing) = declarations.iter_mut().find(|(p, _)| p == property) {
        existing.1 = value.to_string();
    } else {
        declarations.push((property.to_string(), value.to_string()));
    }
}

fn serialize_css_text(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(p, v)| format!("{p}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/style_applicator_tests.rs"]
mod tests;
