//! Main module for patent section extraction

pub mod cleaning;
pub mod extraction;
pub mod persistence;
pub mod pipeline;
pub mod sections;
pub mod segmentation;
pub mod testing;

pub use cleaning::{clean_text, CleaningOptions, CleaningPipeline};
pub use pipeline::{DocumentReader, ProcessedDocument, ReadError};
pub use sections::{PatentSections, SectionSpan, Slot};
pub use segmentation::{split_sections, AbstractPriority, SectionSplitter, SplitOptions};
