//! Cleaning pipeline for raw extracted text
//!
//! Raw OCR/markdown output goes through an ordered list of stages before any section header is
//! looked for:
//!
//! 1. `normalize_line_endings` - `\r\n` and lone `\r` become `\n`
//! 2. `strip_images` - image links and bare figure captions are removed
//! 3. `normalize_tables` - HTML tables become pipe-delimited rows
//! 4. `strip_heading_markers` - leading `#` markers are removed
//! 5. `strip_line_numbers` - patent line numbering (5, 10, 15...) is removed
//!
//! Every stage implements [`Cleaning`]. Stages are pure: same input, same output, and no stage
//! can fail. The standard ordering is available as [`STANDARD_CLEANING`]; a pipeline with some
//! stages switched off can be built from [`CleaningOptions`].

pub mod headings;
pub mod images;
pub mod line_numbers;
pub mod tables;

pub use headings::{normalize_line_endings, strip_heading_markers};
pub use images::{collapse_blank_lines, strip_image_links};
pub use line_numbers::{strip_line_number, strip_line_numbers};
pub use tables::{normalize_tables, render_table};

use once_cell::sync::Lazy;

/// A single text cleaning stage
///
/// # Examples
///
/// ```ignore
/// struct Uppercase;
///
/// impl Cleaning for Uppercase {
///     fn name(&self) -> &str {
///         "uppercase"
///     }
///
///     fn description(&self) -> &str {
///         "Uppercases everything"
///     }
///
///     fn apply(&self, text: &str) -> String {
///         text.to_uppercase()
///     }
/// }
/// ```
pub trait Cleaning: Send + Sync {
    /// Returns the name of this stage
    ///
    /// Names are lowercase with underscores (e.g., "strip_line_numbers")
    fn name(&self) -> &str;

    /// Returns a human-readable description of what this stage does
    fn description(&self) -> &str;

    /// Apply this stage to the text
    fn apply(&self, text: &str) -> String;
}

/// Which stages a [`CleaningPipeline`] runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningOptions {
    pub normalize_line_endings: bool,
    pub strip_images: bool,
    pub normalize_tables: bool,
    pub strip_heading_markers: bool,
    pub strip_line_numbers: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            normalize_line_endings: true,
            strip_images: true,
            normalize_tables: true,
            strip_heading_markers: true,
            strip_line_numbers: true,
        }
    }
}

/// An ordered list of cleaning stages
pub struct CleaningPipeline {
    stages: Vec<Box<dyn Cleaning>>,
}

impl CleaningPipeline {
    /// Create a pipeline with no stages
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage
    pub fn then<C: Cleaning + 'static>(mut self, stage: C) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// The standard stage ordering with every stage enabled
    pub fn standard() -> Self {
        Self::from_options(&CleaningOptions::default())
    }

    /// The standard stage ordering, skipping the stages switched off in `options`
    pub fn from_options(options: &CleaningOptions) -> Self {
        let mut pipeline = Self::new();
        if options.normalize_line_endings {
            pipeline = pipeline.then(NormalizeLineEndings);
        }
        if options.strip_images {
            pipeline = pipeline.then(StripImages);
        }
        if options.normalize_tables {
            pipeline = pipeline.then(NormalizeTables);
        }
        if options.strip_heading_markers {
            pipeline = pipeline.then(StripHeadingMarkers);
        }
        if options.strip_line_numbers {
            pipeline = pipeline.then(StripLineNumbers);
        }
        pipeline
    }

    /// Names of the stages, in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `raw`
    pub fn run(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for stage in &self.stages {
            let before = text.len();
            text = stage.apply(&text);
            log::trace!(
                "cleaning stage '{}': {} -> {} bytes",
                stage.name(),
                before,
                text.len()
            );
        }
        text
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// The standard cleaning pipeline
pub static STANDARD_CLEANING: Lazy<CleaningPipeline> = Lazy::new(CleaningPipeline::standard);

/// Clean `raw` with the standard pipeline
pub fn clean_text(raw: &str) -> String {
    STANDARD_CLEANING.run(raw)
}

pub struct NormalizeLineEndings;

impl Cleaning for NormalizeLineEndings {
    fn name(&self) -> &str {
        "normalize_line_endings"
    }

    fn description(&self) -> &str {
        "Convert CRLF and lone CR line endings to LF"
    }

    fn apply(&self, text: &str) -> String {
        normalize_line_endings(text)
    }
}

pub struct StripImages;

impl Cleaning for StripImages {
    fn name(&self) -> &str {
        "strip_images"
    }

    fn description(&self) -> &str {
        "Remove image links and bare figure captions, then collapse the gaps they leave"
    }

    fn apply(&self, text: &str) -> String {
        strip_image_links(text)
    }
}

pub struct NormalizeTables;

impl Cleaning for NormalizeTables {
    fn name(&self) -> &str {
        "normalize_tables"
    }

    fn description(&self) -> &str {
        "Render HTML tables as pipe-delimited rows"
    }

    fn apply(&self, text: &str) -> String {
        normalize_tables(text)
    }
}

pub struct StripHeadingMarkers;

impl Cleaning for StripHeadingMarkers {
    fn name(&self) -> &str {
        "strip_heading_markers"
    }

    fn description(&self) -> &str {
        "Remove markdown heading markers at the start of lines"
    }

    fn apply(&self, text: &str) -> String {
        strip_heading_markers(text)
    }
}

pub struct StripLineNumbers;

impl Cleaning for StripLineNumbers {
    fn name(&self) -> &str {
        "strip_line_numbers"
    }

    fn description(&self) -> &str {
        "Remove patent line numbering (positive multiples of 5) at the start of lines"
    }

    fn apply(&self, text: &str) -> String {
        strip_line_numbers(text)
    }
}
