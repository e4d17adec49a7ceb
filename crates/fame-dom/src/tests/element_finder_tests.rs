use fame_testing::{FakeDocument, FakeElement};

use super::*;
use crate::document::Element;

fn tree() -> (FakeDocument, FakeElement, FakeElement, FakeElement, FakeElement) {
    let document = FakeDocument::new();
    let root = FakeElement::new("section").with_id("root");
    let child_a = FakeElement::new("div").with_class("item");
    let child_b = FakeElement::new("span").with_class("item");
    let grandchild = FakeElement::new("em");
    root.append_child(&child_a);
    root.append_child(&child_b);
    child_a.append_child(&grandchild);
    document.register(&root);
    (document, root, child_a, child_b, grandchild)
}

#[test]
fn self_scope_returns_only_the_root() {
    let (document, root, ..) = tree();
    let selection = ElementSelection::new(Scope::SelfScope);
    let found = ElementFinder::resolve(&document, &root.handle(), &selection);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identity(), root.handle().identity());
}

#[test]
fn direct_children_excludes_grandchildren() {
    let (document, root, child_a, child_b, _) = tree();
    let selection = ElementSelection::new(Scope::Children).with_depth(Depth::Direct);
    let found = ElementFinder::resolve(&document, &root.handle(), &selection);
    let ids: Vec<usize> = found.iter().map(|e| e.identity()).collect();
    assert_eq!(ids, vec![child_a.handle().identity(), child_b.handle().identity()]);
}

#[test]
fn deep_children_includes_grandchildren() {
    let (document, root, _, _, grandchild) = tree();
    let selection = ElementSelection::new(Scope::Children).with_depth(Depth::Deep);
    let found = ElementFinder::resolve(&document, &root.handle(), &selection);
    assert!(found.iter().any(|e| e.identity() == grandchild.handle().identity()));
}

#[test]
fn siblings_excludes_self() {
    let (document, _root, child_a, child_b, _) = tree();
    let selection = ElementSelection::new(Scope::Siblings).with_depth(Depth::Direct);
    let found = ElementFinder::resolve(&document, &child_a.handle(), &selection);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identity(), child_b.handle().identity());
}

#[test]
fn parent_scope_resolves_to_direct_parent() {
    let (document, root, child_a, ..) = tree();
    let selection = ElementSelection::new(Scope::Parent);
    let found = ElementFinder::resolve(&document, &child_a.handle(), &selection);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identity(), root.handle().identity());
}

#[test]
fn criteria_and_combine() {
    let (document, root, child_a, _, _) = tree();
    let selection = ElementSelection::new(Scope::Children)
        .with_depth(Depth::Direct)
        .with_criterion(CriteriaKind::CssSelector, ".item")
        .with_criterion(CriteriaKind::HtmlTag, "div");
    let found = ElementFinder::resolve(&document, &root.handle(), &selection);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identity(), child_a.handle().identity());
}

#[test]
fn document_scope_searches_the_whole_tree() {
    let (document, _root, _, _, grandchild) = tree();
    let selection = ElementSelection::new(Scope::Document).with_criterion(CriteriaKind::HtmlTag, "em");
    let found = ElementFinder::resolve(&document, &grandchild.handle(), &selection);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identity(), grandchild.handle().identity());
}

#[test]
fn fourth_criterion_is_ignored_not_rejected() {
    let selection = ElementSelection::new(Scope::SelfScope)
        .with_criterion(CriteriaKind::HtmlTag, "div")
        .with_criterion(CriteriaKind::ElementId, "x")
        .with_criterion(CriteriaKind::CssSelector, ".y")
        .with_criterion(CriteriaKind::FramerName, "z");
    assert_eq!(selection.criteria.len(), 3);
}
