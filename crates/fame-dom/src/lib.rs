//! Style Applicator, Element Finder, Dynamic Element Registry, and the host
//! `Document`/`Element` traits (C6, C7, C8, C21).

pub mod document;
pub mod element_finder;
pub mod registry;
pub mod style_applicator;

#[cfg(feature = "web")]
pub mod web;

pub use document::{Document, DocumentHandle, Element, ElementHandle, EnvironmentMode, ListenerId, Rect};
pub use element_finder::{Criterion, CriteriaKind, Depth, ElementFinder, ElementSelection, Scope};
pub use registry::{DynamicElementRegistry, MissPolicy, ELEMENT_ID_ATTRIBUTE};
pub use style_applicator::StyleApplicator;
