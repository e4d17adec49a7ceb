//! Element Finder (C7): resolves an `ElementSelection` against a root
//! element (or the whole document) into a stable, document-ordered list of
//! elements.

use serde::{Deserialize, Serialize};

use crate::document::{Document, ElementHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    SelfScope,
    Parent,
    Children,
    Siblings,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Depth {
    Direct,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriteriaKind {
    FramerName,
    HtmlTag,
    CssSelector,
    ElementId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub kind: CriteriaKind,
    pub value: String,
}

/// A selection of elements relative to a component root. `depth` is only
/// meaningful for `Children`/`Siblings`; `criteria` holds 0..3 AND-combined
/// filters, per §3's data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSelection {
    pub scope: Scope,
    pub depth: Option<Depth>,
    pub criteria: Vec<Criterion>,
}

impl ElementSelection {
    pub fn new(scope: Scope) -> Self {
        Self { scope, depth: None, criteria: Vec::new() }
    }

    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Adds a criterion. Silently caps at 3 (the data model's declared
    /// `0..3` range) rather than raising — malformed authoring data here is
    /// harmless, not a construction error worth a `FameError`.
    pub fn with_criterion(mut self, kind: CriteriaKind, value: impl Into<String>) -> Self {
        if self.criteria.len() >= 3 {
            log::warn!("element selection already has 3 criteria; ignoring extra {kind:?}");
            return self;
        }
        self.criteria.push(Criterion { kind, value: value.into() });
        self
    }
}

pub struct ElementFinder;

impl ElementFinder {
    /// Resolves `selection` against `root`, returning elements in document
    /// order. Empty results are the caller's (C19's) responsibility to warn
    /// on, per §7 ("No trigger/animated elements -> warn; no-op cleanup").
    pub fn resolve(
        document: &dyn Document,
        root: &ElementHandle,
        selection: &ElementSelection,
    ) -> Vec<ElementHandle> {
        let candidates = match selection.scope {
            Scope::SelfScope => vec![root.clone()],
            Scope::Parent => root.parent().into_iter().collect(),
            Scope::Children => match selection.depth.unwrap_or(Depth::Direct) {
                Depth::Direct => root.children(),
                Depth::Deep => deep_descendants(root),
            },
            Scope::Siblings => {
                let Some(parent) = root.parent() else { return Vec::new() };
                let direct_siblings: Vec<ElementHandle> = parent
                    .children()
                    .into_iter()
                    .filter(|el| el.identity() != root.identity())
                    .collect();
                match selection.depth.unwrap_or(Depth::Direct) {
                    Depth::Direct => direct_siblings,
                    Depth::Deep => {
                        let mut out = Vec::new();
                        for sibling in &direct_siblings {
                            out.push(sibling.clone());
                            out.extend(deep_descendants(sibling));
                        }
                        out
                    }
                }
            }
            Scope::Document => document.query_selector_all("*"),
        };

        candidates
            .into_iter()
            .filter(|el| criteria_match(el.as_ref(), &selection.criteria))
            .collect()
    }
}

fn deep_descendants(root: &ElementHandle) -> Vec<ElementHandle> {
    let mut out = Vec::new();
    for child in root.children() {
        out.push(child.clone());
        out.extend(deep_descendants(&child));
    }
    out
}

fn criteria_match(element: &dyn crate::document::Element, criteria: &[Criterion]) -> bool {
    criteria.iter().all(|criterion| match criterion.kind {
        CriteriaKind::FramerName => {
            element.attribute("data-framer-name").as_deref() == Some(criterion.value.as_str())
        }
        CriteriaKind::HtmlTag => element.tag_name().eq_ignore_ascii_case(&criterion.value),
        CriteriaKind::CssSelector => element.matches(&criterion.value),
        CriteriaKind::ElementId => {
            element.attribute("id").as_deref() == Some(criterion.value.as_str())
        }
    })
}

#[cfg(test)]
#[path = "tests/element_finder_tests.rs"]
mod tests;
