//! Text Splitter (C9): splits a container's text into line/word/character
//! wrapper elements, preserving stable `data-fame-element-id`s across
//! re-splits so animations keyed on an id never lose their target.

mod config;
mod splitter;

pub use config::{SplitType, TextSplitConfig};
pub use splitter::{SplitOutcome, TextSplitter, CLASS_CHAR, CLASS_LINE, CLASS_MASK, CLASS_SPACE, CLASS_WORD};
