//! Segmentation of cleaned patent text
//!
//! - [`headers`]: phrase tables and the line-anchored matchers built from them
//! - [`abstracts`]: finding where an abstract starts and ends, and cutting it out
//! - [`splitter`]: the description / claims / abstract split itself

pub mod abstracts;
pub mod headers;
pub mod splitter;

pub use abstracts::{AbstractBoundary, AbstractExtractor, DEFAULT_PARAGRAPH_BREAK_WINDOW};
pub use headers::{HeaderMatch, HeaderMatcher, HeaderPattern, LineShape, PatternError};
pub use splitter::{split_sections, AbstractPriority, SectionSplitter, SplitOptions, SplitState};
