//! Document reading pipeline
//!
//! [`DocumentReader`] wires the three stages together: extract text from a file through the
//! [`ExtractorRegistry`], run the [`CleaningPipeline`], then split with a [`SectionSplitter`].
//! [`DocumentReader::process`] skips extraction and works on a string already in memory.
//!
//! The drawings read is separate: it keeps figure descriptions as the engine produced them and
//! only drops image links and bare captions.

use crate::patent::cleaning::{normalize_line_endings, strip_image_links, CleaningPipeline};
use crate::patent::extraction::{ExtractionError, ExtractorRegistry, TextExtractor};
use crate::patent::persistence::{persist_sections, PersistenceError, SectionSink};
use crate::patent::sections::{PatentSections, Slot};
use crate::patent::segmentation::SectionSplitter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Cleaned text of one document and the sections split from it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub cleaned: String,
    pub sections: PatentSections,
}

impl ProcessedDocument {
    /// Write the sections to `sink`, returning the slots written
    pub fn persist<S: SectionSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> Result<Vec<Slot>, ReadError> {
        Ok(persist_sections(&self.sections, sink)?)
    }
}

pub struct DocumentReader {
    registry: ExtractorRegistry,
    cleaning: CleaningPipeline,
    splitter: SectionSplitter,
}

impl DocumentReader {
    /// A reader with the default registry, the standard cleaning stages and the default splitter
    pub fn new() -> Self {
        Self::with_parts(
            ExtractorRegistry::with_defaults(),
            CleaningPipeline::standard(),
            SectionSplitter::new(),
        )
    }

    pub fn with_parts(
        registry: ExtractorRegistry,
        cleaning: CleaningPipeline,
        splitter: SectionSplitter,
    ) -> Self {
        Self {
            registry,
            cleaning,
            splitter,
        }
    }

    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_cleaning(mut self, cleaning: CleaningPipeline) -> Self {
        self.cleaning = cleaning;
        self
    }

    pub fn with_splitter(mut self, splitter: SectionSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Add an extractor to the registry
    pub fn register<E: TextExtractor + 'static>(&mut self, extractor: E) {
        self.registry.register(extractor);
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    pub fn cleaning(&self) -> &CleaningPipeline {
        &self.cleaning
    }

    pub fn splitter(&self) -> &SectionSplitter {
        &self.splitter
    }

    /// Clean and split text that is already in memory
    pub fn process(&self, raw: &str) -> ProcessedDocument {
        let cleaned = self.cleaning.run(raw);
        let sections = self.splitter.split(&cleaned);
        log::debug!(
            "split {} bytes: description {} bytes, claims {}, abstract {}",
            cleaned.len(),
            sections.description.len(),
            if sections.has_claims() { "yes" } else { "no" },
            if sections.has_abstract() { "yes" } else { "no" }
        );
        ProcessedDocument { cleaned, sections }
    }

    /// Extract, clean and split the document at `path`
    pub fn read(&self, path: &Path) -> Result<ProcessedDocument, ReadError> {
        let raw = self.registry.extract(path)?;
        Ok(self.process(&raw))
    }

    /// Extract the document at `path` and keep it as drawings text
    pub fn read_drawings(&self, path: &Path) -> Result<String, ReadError> {
        let raw = self.registry.extract(path)?;
        Ok(drawings_text(&raw))
    }
}

impl Default for DocumentReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Drawings text from raw engine output: image links and bare captions removed
pub fn drawings_text(raw: &str) -> String {
    strip_image_links(&normalize_line_endings(raw))
        .trim()
        .to_string()
}
