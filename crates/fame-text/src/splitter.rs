//! Text Splitter (C9): rebuilds a container's text into line/word/character
//! wrapper elements with stable ids preserved across re-splits.
//!
//! Line grouping measures each grapheme cluster's bounding rect via
//! `Document::measure_text_range` (`Range.getBoundingClientRect()` in a real
//! browser) and buckets consecutive clusters whose top-y stays within a
//! tolerance, generalizing a `ScrollPositionResolver`-style tolerance-bucketing
//! idiom from a 1-D scroll offset to this text-layout axis. Word/character
//! segmentation goes through `unicode-segmentation`
//! rather than a byte or `char` scan, since "characters" in the data model
//! means grapheme clusters.

use fame_core::FameConfig;
use fame_dom::{Document, Element, ElementHandle, DynamicElementRegistry, ELEMENT_ID_ATTRIBUTE};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::{SplitType, TextSplitConfig};

pub const CLASS_LINE: &str = "fame-text-line";
pub const CLASS_WORD: &str = "fame-text-word";
pub const CLASS_CHAR: &str = "fame-text-char";
pub const CLASS_MASK: &str = "fame-text-mask";
pub const CLASS_SPACE: &str = "fame-text-space";

/// Result of one `TextSplitter::split` call.
pub struct SplitOutcome {
    /// Elements at the `animate_by` granularity, document order. These are
    /// what `fame-engine`'s C19 adopts as the slot's animated element set.
    pub animated_elements: Vec<ElementHandle>,
    /// `true` when splitting failed or produced nothing at the requested
    /// granularity and the caller is animating the original container
    /// instead (§7: "Text split failure -> fall back... emit warning").
    pub fallback: bool,
}

#[derive(Clone, Copy)]
pub struct TextSplitter {
    forced_tolerance_px: f64,
    normal_tolerance_px: f64,
}

impl TextSplitter {
    pub fn new(config: FameConfig) -> Self {
        Self {
            forced_tolerance_px: config.forced_split_tolerance_px,
            normal_tolerance_px: config.normal_split_tolerance_px,
        }
    }

    /// Captures `container`'s plain text, tears its children down, and
    /// rebuilds them at `config.split_type`'s granularity. `forced` selects
    /// the tighter line-grouping tolerance used on a breakpoint transition
    /// (§4.9 point 5); every call rebuilds regardless of `forced` — the flag
    /// only changes the tolerance, since FAME has no structure-intactness
    /// cache to short-circuit against.
    pub fn split(
        &self,
        document: &dyn Document,
        registry: &DynamicElementRegistry,
        container: &ElementHandle,
        config: &TextSplitConfig,
        forced: bool,
    ) -> SplitOutcome {
        let text = container.text_content();
        if text.trim().is_empty() {
            log::warn!("fame-text: container has no text content; animating the original element");
            return SplitOutcome { animated_elements: vec![container.clone()], fallback: true };
        }

        let old_line_ids = capture_existing_ids(container, CLASS_LINE);
        let old_word_ids = capture_existing_ids(container, CLASS_WORD);
        let old_char_ids = capture_existing_ids(container, CLASS_CHAR);

        container.remove_all_children();

        let (line_wrappers, word_wrappers, char_wrappers) = match config.split_type {
            SplitType::Lines => {
                let tolerance = if forced { self.forced_tolerance_px } else { self.normal_tolerance_px };
                let lines = build_lines(document, container, &text, tolerance, config.mask_lines);
                (lines, Vec::new(), Vec::new())
            }
            SplitType::Words => {
                let words = build_words(document, container, &text);
                (Vec::new(), words, Vec::new())
            }
            SplitType::Characters => {
                let (words, chars) = build_characters(document, container, &text);
                (Vec::new(), words, chars)
            }
        };

        apply_preserved_ids(registry, &old_line_ids, &line_wrappers);
        apply_preserved_ids(registry, &old_word_ids, &word_wrappers);
        apply_preserved_ids(registry, &old_char_ids, &char_wrappers);

        let animated = match config.animate_by {
            SplitType::Lines => line_wrappers,
            SplitType::Words => word_wrappers,
            SplitType::Characters => char_wrappers,
        };

        if animated.is_empty() {
            log::warn!(
                "fame-text: split produced no elements at the requested animate_by granularity; \
                 animating the original element"
            );
            return SplitOutcome { animated_elements: vec![container.clone()], fallback: true };
        }

        SplitOutcome { animated_elements: animated, fallback: false }
    }
}

fn is_word_like(segment: &str) -> bool {
    segment.chars().any(|c| c.is_alphanumeric())
}

fn grapheme_ranges(text: &str) -> Vec<(usize, usize)> {
    let starts: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    let mut out = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        out.push((start, end));
    }
    out
}

fn build_lines(
    document: &dyn Document,
    container: &ElementHandle,
    text: &str,
    tolerance: f64,
    mask: bool,
) -> Vec<ElementHandle> {
    let graphemes = grapheme_ranges(text);
    let Some(&(first_start, first_end)) = graphemes.first() else { return Vec::new() };

    let mut line_ranges: Vec<(usize, usize)> = Vec::new();
    let mut current_start = first_start;
    let mut current_end = first_end;
    let mut current_y = document.measure_text_range(container, text, current_start, current_end).y;

    for &(start, end) in &graphemes[1..] {
        let y = document.measure_text_range(container, text, start, end).y;
        if (y - current_y).abs() <= tolerance {
            current_end = end;
        } else {
            line_ranges.push((current_start, current_end));
            current_start = start;
            current_end = end;
            current_y = y;
        }
    }
    line_ranges.push((current_start, current_end));

    line_ranges
        .into_iter()
        .map(|(start, end)| {
            let line_el = document.create_element("span");
            line_el.set_attribute("class", CLASS_LINE);
            line_el.set_text_content(&text[start..end]);
            if mask {
                let mask_el = document.create_element("span");
                mask_el.set_attribute("class", CLASS_MASK);
                mask_el.set_inline_style_css_text("overflow: hidden; display: block;");
                mask_el.append_child_node(&line_el);
                container.append_child_node(&mask_el);
            } else {
                container.append_child_node(&line_el);
            }
            line_el
        })
        .collect()
}

fn build_words(document: &dyn Document, container: &ElementHandle, text: &str) -> Vec<ElementHandle> {
    let mut words = Vec::new();
    for (_, segment) in text.split_word_bound_indices() {
        let el = document.create_element("span");
        el.set_text_content(segment);
        if is_word_like(segment) {
            el.set_attribute("class", CLASS_WORD);
            container.append_child_node(&el);
            words.push(el);
        } else {
            el.set_attribute("class", CLASS_SPACE);
            container.append_child_node(&el);
        }
    }
    words
}

fn build_characters(
    document: &dyn Document,
    container: &ElementHandle,
    text: &str,
) -> (Vec<ElementHandle>, Vec<ElementHandle>) {
    let mut word_wrappers = Vec::new();
    let mut char_wrappers = Vec::new();
    for (_, segment) in text.split_word_bound_indices() {
        if is_word_like(segment) {
            let word_el = document.create_element("span");
            word_el.set_attribute("class", CLASS_WORD);
            for (_, grapheme) in segment.grapheme_indices(true) {
                let char_el = document.create_element("span");
                char_el.set_attribute("class", CLASS_CHAR);
                char_el.set_text_content(grapheme);
                word_el.append_child_node(&char_el);
                char_wrappers.push(char_el);
            }
            container.append_child_node(&word_el);
            word_wrappers.push(word_el);
        } else {
            let space_el = document.create_element("span");
            space_el.set_attribute("class", CLASS_SPACE);
            space_el.set_text_content(segment);
            container.append_child_node(&space_el);
        }
    }
    (word_wrappers, char_wrappers)
}

fn has_class(element: &dyn Element, class: &str) -> bool {
    element.attribute("class").map(|c| c.split_whitespace().any(|c| c == class)).unwrap_or(false)
}

/// Walks `container`'s current (pre-teardown) descendant tree, collecting
/// the `data-fame-element-id` of every element carrying `class`, in
/// document order — the "before destroying children" half of the re-split
/// protocol (§4.9 point 4).
fn capture_existing_ids(container: &ElementHandle, class: &str) -> Vec<String> {
    let mut out = Vec::new();
    collect_existing_ids(container, class, &mut out);
    out
}

fn collect_existing_ids(element: &ElementHandle, class: &str, out: &mut Vec<String>) {
    for child in element.children() {
        if has_class(child.as_ref(), class) {
            if let Some(id) = child.attribute(ELEMENT_ID_ATTRIBUTE) {
                out.push(id);
            }
        }
        collect_existing_ids(&child, class, out);
    }
}

/// Reapplies `old_ids` to `new_wrappers` by ordinal up to `min(old, new)`,
/// mints fresh ids for any surplus new wrapper, and unregisters any surplus
/// old id — the "after re-split, reapply by ordinal" half of the protocol.
fn apply_preserved_ids(registry: &DynamicElementRegistry, old_ids: &[String], new_wrappers: &[ElementHandle]) {
    for (i, wrapper) in new_wrappers.iter().enumerate() {
        match old_ids.get(i) {
            Some(old_id) => {
                wrapper.set_attribute(ELEMENT_ID_ATTRIBUTE, old_id);
                registry.register(old_id, wrapper);
            }
            None => {
                registry.ensure_element_id(wrapper);
            }
        }
    }
    for dropped in old_ids.iter().skip(new_wrappers.len()) {
        registry.unregister(dropped);
    }
}

#[cfg(test)]
#[path = "tests/splitter_tests.rs"]
mod tests;
