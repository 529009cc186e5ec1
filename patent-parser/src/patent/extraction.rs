//! Text extraction
//!
//! Turning a PDF, DOCX or scanned image into text is somebody else's job: an OCR/layout engine.
//! This module defines the seam ([`TextExtractor`]) and two adapters:
//!
//! - [`PlainTextExtractor`] reads markdown and text files as they are. Output an engine already
//!   produced goes through here, and so do the tests.
//! - [`CommandExtractor`] runs an external document-parsing program and collects the markdown it
//!   writes.
//!
//! [`ExtractorRegistry`] picks an extractor for a path by its [`InputFormat`].

pub mod command;
pub mod plain;
pub mod registry;

pub use command::CommandExtractor;
pub use plain::PlainTextExtractor;
pub use registry::ExtractorRegistry;

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from locating or running a text extractor
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("extraction engine '{0}' is not available")]
    EngineUnavailable(String),

    #[error("extraction engine '{engine}' failed: {message}")]
    EngineFailed { engine: String, message: String },

    #[error("extraction produced no markdown output for {0}")]
    NoOutput(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input document formats, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    Pdf,
    Docx,
    Image,
    Markdown,
    Text,
}

impl InputFormat {
    pub const ALL: [InputFormat; 5] = [
        InputFormat::Pdf,
        InputFormat::Docx,
        InputFormat::Image,
        InputFormat::Markdown,
        InputFormat::Text,
    ];

    /// Detect the format from an extension, without the dot, case-insensitively
    pub fn from_extension(ext: &str) -> Option<InputFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(InputFormat::Pdf),
            "docx" => Some(InputFormat::Docx),
            "png" | "jpg" | "jpeg" | "tiff" | "bmp" => Some(InputFormat::Image),
            "md" | "markdown" => Some(InputFormat::Markdown),
            "txt" => Some(InputFormat::Text),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<InputFormat, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        InputFormat::from_extension(ext).ok_or_else(|| {
            ExtractionError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{}", ext)
            })
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Pdf => "pdf",
            InputFormat::Docx => "docx",
            InputFormat::Image => "image",
            InputFormat::Markdown => "markdown",
            InputFormat::Text => "text",
        }
    }

    /// Parse a format by name or by one of its extensions
    pub fn from_name(name: &str) -> Option<InputFormat> {
        let lower = name.trim().to_ascii_lowercase();
        InputFormat::ALL
            .into_iter()
            .find(|f| f.name() == lower)
            .or_else(|| InputFormat::from_extension(&lower))
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that turns a document file into text
///
/// Implementations must be safe to share between threads. They get the path of an existing file
/// whose format is one of [`TextExtractor::formats`].
///
/// # Example
///
/// ```ignore
/// struct Canned;
///
/// impl TextExtractor for Canned {
///     fn name(&self) -> &str {
///         "canned"
///     }
///     fn formats(&self) -> &[InputFormat] {
///         &[InputFormat::Pdf]
///     }
///     fn extract(&self, _path: &Path) -> Result<String, ExtractionError> {
///         Ok("Claims\n1. A widget.".to_string())
///     }
/// }
/// ```
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &str;

    fn formats(&self) -> &[InputFormat];

    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;

    fn supports(&self, format: InputFormat) -> bool {
        self.formats().contains(&format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pdf", InputFormat::Pdf)]
    #[case("PDF", InputFormat::Pdf)]
    #[case("docx", InputFormat::Docx)]
    #[case("png", InputFormat::Image)]
    #[case("JPEG", InputFormat::Image)]
    #[case("tiff", InputFormat::Image)]
    #[case("bmp", InputFormat::Image)]
    #[case("md", InputFormat::Markdown)]
    #[case("txt", InputFormat::Text)]
    fn test_format_from_extension(#[case] ext: &str, #[case] expected: InputFormat) {
        assert_eq!(InputFormat::from_extension(ext), Some(expected));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(InputFormat::from_extension("doc"), None);
        let err = InputFormat::from_path(Path::new("patent.xyz")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ref e) if e == ".xyz"));
        assert!(InputFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(InputFormat::from_name("image"), Some(InputFormat::Image));
        assert_eq!(InputFormat::from_name("jpg"), Some(InputFormat::Image));
        assert_eq!(InputFormat::from_name("Markdown"), Some(InputFormat::Markdown));
        assert_eq!(InputFormat::from_name("rtf"), None);
    }

    #[test]
    fn test_error_messages() {
        let err = ExtractionError::EngineFailed {
            engine: "mineru".into(),
            message: "bad page".into(),
        };
        assert_eq!(err.to_string(), "extraction engine 'mineru' failed: bad page");
    }
}
