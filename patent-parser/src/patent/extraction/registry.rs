//! Extractor registry
//!
//! Holds the available [`TextExtractor`]s in registration order and dispatches a path to the
//! first one that supports its [`InputFormat`].

use super::{ExtractionError, InputFormat, PlainTextExtractor, TextExtractor};
use std::path::Path;

/// Registry of text extractors
///
/// # Examples
///
/// ```ignore
/// let mut registry = ExtractorRegistry::with_defaults();
/// registry.register(CommandExtractor::mineru());
///
/// let text = registry.extract(Path::new("patent.pdf"))?;
/// ```
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ExtractorRegistry {
            extractors: Vec::new(),
        }
    }

    /// Register an extractor
    ///
    /// An extractor with the same name is replaced in place, keeping its position.
    pub fn register<E: TextExtractor + 'static>(&mut self, extractor: E) {
        let boxed: Box<dyn TextExtractor> = Box::new(extractor);
        match self
            .extractors
            .iter()
            .position(|e| e.name() == boxed.name())
        {
            Some(index) => self.extractors[index] = boxed,
            None => self.extractors.push(boxed),
        }
    }

    /// First extractor that handles `format`
    pub fn get_for(&self, format: InputFormat) -> Result<&dyn TextExtractor, ExtractionError> {
        self.extractors
            .iter()
            .find(|e| e.supports(format))
            .map(|e| e.as_ref())
            .ok_or_else(|| ExtractionError::UnsupportedFormat(format.to_string()))
    }

    /// Check if an extractor is registered under `name`
    pub fn has(&self, name: &str) -> bool {
        self.extractors.iter().any(|e| e.name() == name)
    }

    /// Names and formats of the registered extractors, in dispatch order
    pub fn list(&self) -> Vec<(String, Vec<InputFormat>)> {
        self.extractors
            .iter()
            .map(|e| (e.name().to_string(), e.formats().to_vec()))
            .collect()
    }

    /// Extract the text of the document at `path`
    pub fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }
        let format = InputFormat::from_path(path)?;
        let extractor = self.get_for(format)?;
        log::info!(
            "extracting {} ({}) with '{}'",
            path.display(),
            format,
            extractor.name()
        );
        let text = extractor.extract(path)?;
        if text.trim().is_empty() {
            log::warn!(
                "'{}' produced no text for {}",
                extractor.name(),
                path.display()
            );
        }
        Ok(text)
    }

    /// Create a registry with the plain-text extractor only
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PlainTextExtractor);
        registry
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
