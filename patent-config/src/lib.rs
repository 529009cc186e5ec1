//! Shared configuration loader for the patent section tools.
//!
//! `defaults/patent.default.toml` is embedded into every binary so that the documented defaults
//! and runtime behavior stay in sync. Layers, lowest first:
//!
//! 1. the embedded defaults
//! 2. the per-user file, `<config dir>/patent/config.toml` (see [`user_config_path`])
//! 3. an explicit file (`--config`)
//! 4. single-key overrides from command-line flags
//!
//! [`Loader::build`] deserializes the result into [`PatentConfig`] and rejects values the parser
//! cannot use before any document is read.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use patent_parser::patent::extraction::{CommandExtractor, InputFormat};
use patent_parser::patent::{AbstractPriority, CleaningOptions, SectionSplitter, SplitOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/patent.default.toml");

const USER_CONFIG_DIR: &str = "patent";
const USER_CONFIG_FILE: &str = "config.toml";

/// Where the per-user configuration file lives, if the platform has a config directory
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| user_config_path_in(&base))
}

/// The per-user configuration file under `base`
pub fn user_config_path_in(base: &Path) -> PathBuf {
    base.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE)
}

/// Top-level configuration consumed by the patent tools.
#[derive(Debug, Clone, Deserialize)]
pub struct PatentConfig {
    pub cleaning: CleaningConfig,
    pub segmentation: SegmentationConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// One switch per cleaning stage.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CleaningConfig {
    pub normalize_line_endings: bool,
    pub strip_images: bool,
    pub normalize_tables: bool,
    pub strip_heading_markers: bool,
    pub strip_line_numbers: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationConfig {
    pub abstract_priority: AbstractPriority,
    pub paragraph_break_window: usize,
    pub extra_claims_headers: Vec<String>,
    pub extra_abstract_headers: Vec<String>,
    pub extra_section_headers: Vec<String>,
}

/// External document-to-markdown engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    pub command: String,
    pub args: Vec<String>,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub persist: bool,
}

impl From<CleaningConfig> for CleaningOptions {
    fn from(config: CleaningConfig) -> Self {
        CleaningOptions {
            normalize_line_endings: config.normalize_line_endings,
            strip_images: config.strip_images,
            normalize_tables: config.normalize_tables,
            strip_heading_markers: config.strip_heading_markers,
            strip_line_numbers: config.strip_line_numbers,
        }
    }
}

impl From<&SegmentationConfig> for SplitOptions {
    fn from(config: &SegmentationConfig) -> Self {
        SplitOptions {
            abstract_priority: config.abstract_priority,
            paragraph_break_window: config.paragraph_break_window,
            extra_claims_headers: config.extra_claims_headers.clone(),
            extra_abstract_headers: config.extra_abstract_headers.clone(),
            extra_section_headers: config.extra_section_headers.clone(),
        }
    }
}

impl ExtractionConfig {
    /// Formats the engine is used for. Unknown names are an error.
    pub fn input_formats(&self) -> Result<Vec<InputFormat>, ConfigError> {
        self.formats
            .iter()
            .map(|name| {
                InputFormat::from_name(name).ok_or_else(|| {
                    ConfigError::Message(format!(
                        "extraction.formats: unknown input format '{}'",
                        name
                    ))
                })
            })
            .collect()
    }

    /// The configured engine, or `None` when no command is set.
    pub fn command_extractor(&self) -> Result<Option<CommandExtractor>, ConfigError> {
        let command = self.command.trim();
        if command.is_empty() {
            return Ok(None);
        }
        let extractor =
            CommandExtractor::new(command, self.args.clone()).with_formats(self.input_formats()?);
        Ok(Some(extractor))
    }
}

/// Layers configuration sources over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults only.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Start from the embedded defaults plus the per-user file, when there is one.
    pub fn for_user() -> Self {
        match user_config_path() {
            Some(path) => {
                log::debug!("user configuration: {}", path.display());
                Self::new().with_optional_file(path)
            }
            None => Self::new(),
        }
    }

    /// Layer a configuration file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Layer a configuration file, skipping it if absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one key, as a command-line flag does.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and check the result.
    ///
    /// Header phrases must compile and extraction formats must be known names; both are reported
    /// as [`ConfigError::Message`] naming the offending key.
    pub fn build(self) -> Result<PatentConfig, ConfigError> {
        let config: PatentConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl PatentConfig {
    /// Check the values that only fail once they reach the parser.
    pub fn validate(&self) -> Result<(), ConfigError> {
        SectionSplitter::with_options(&SplitOptions::from(&self.segmentation))
            .map_err(|e| ConfigError::Message(format!("segmentation: {}", e)))?;
        self.extraction.input_formats()?;
        Ok(())
    }
}

/// The embedded defaults, without any user file.
pub fn load_defaults() -> Result<PatentConfig, ConfigError> {
    Loader::new().build()
}
