//! Pass-through extractor for documents that already are text

use super::{ExtractionError, InputFormat, TextExtractor};
use std::fs;
use std::path::Path;

const PLAIN_FORMATS: &[InputFormat] = &[InputFormat::Markdown, InputFormat::Text];

/// Reads markdown and text files verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain"
    }

    fn formats(&self) -> &[InputFormat] {
        PLAIN_FORMATS
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
