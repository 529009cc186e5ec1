//! Section splitter
//!
//! One search for a claims header over the cleaned text decides the path:
//!
//! - No claims header: the whole text is description, minus an abstract if one is found. This is
//!   the degraded path. It is logged as a warning and still yields a usable description.
//! - Claims header found: everything before the header line is the description candidate,
//!   everything from it on is the claims candidate (header line included). A trailing abstract
//!   is cut off the claims, a leading one is cut out of the description, and
//!   [`AbstractPriority`] picks which one is reported when both exist.

use super::abstracts::{AbstractExtractor, DEFAULT_PARAGRAPH_BREAK_WINDOW};
use super::headers::{HeaderMatcher, PatternError};
use crate::patent::sections::{PatentSections, SectionSpan};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which abstract wins when one is found before the claims and another after them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbstractPriority {
    /// The abstract printed after the claims
    #[default]
    Trailing,
    /// The abstract printed before the claims
    Leading,
}

impl AbstractPriority {
    pub fn choose(self, leading: Option<String>, trailing: Option<String>) -> Option<String> {
        match self {
            AbstractPriority::Trailing => trailing.or(leading),
            AbstractPriority::Leading => leading.or(trailing),
        }
    }
}

impl fmt::Display for AbstractPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractPriority::Trailing => write!(f, "trailing"),
            AbstractPriority::Leading => write!(f, "leading"),
        }
    }
}

impl FromStr for AbstractPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trailing" => Ok(AbstractPriority::Trailing),
            "leading" => Ok(AbstractPriority::Leading),
            other => Err(format!(
                "unknown abstract priority '{}' (expected 'trailing' or 'leading')",
                other
            )),
        }
    }
}

/// Tunables for [`SectionSplitter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub abstract_priority: AbstractPriority,
    pub paragraph_break_window: usize,
    /// Extra claims header phrases (regex fragments), tried after the built-in ones
    pub extra_claims_headers: Vec<String>,
    /// Extra abstract header phrases (regex fragments), tried after the built-in ones
    pub extra_abstract_headers: Vec<String>,
    /// Extra section words that close an abstract
    pub extra_section_headers: Vec<String>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            abstract_priority: AbstractPriority::default(),
            paragraph_break_window: DEFAULT_PARAGRAPH_BREAK_WINDOW,
            extra_claims_headers: Vec::new(),
            extra_abstract_headers: Vec::new(),
            extra_section_headers: Vec::new(),
        }
    }
}

/// Which way a split went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitState {
    NoClaimsHeader,
    ClaimsHeaderFound { header: SectionSpan },
}

/// Splits cleaned text into description, claims and abstract
#[derive(Debug, Clone)]
pub struct SectionSplitter {
    claims_headers: HeaderMatcher,
    abstracts: AbstractExtractor,
    abstract_priority: AbstractPriority,
}

static DEFAULT_SPLITTER: Lazy<SectionSplitter> = Lazy::new(SectionSplitter::new);

/// Split `text` with the built-in headers and the default policy
pub fn split_sections(text: &str) -> PatentSections {
    DEFAULT_SPLITTER.split(text)
}

impl SectionSplitter {
    pub fn new() -> Self {
        Self {
            claims_headers: HeaderMatcher::claims(),
            abstracts: AbstractExtractor::new(),
            abstract_priority: AbstractPriority::default(),
        }
    }

    /// Build a splitter with extra header phrasings and a non-default policy
    pub fn with_options(options: &SplitOptions) -> Result<Self, PatternError> {
        let claims_headers = HeaderMatcher::claims().extended(&options.extra_claims_headers)?;
        let abstract_headers =
            HeaderMatcher::abstracts().extended(&options.extra_abstract_headers)?;
        let section_headers =
            HeaderMatcher::sections().extended(&options.extra_section_headers)?;
        let abstracts = AbstractExtractor::with_matchers(
            abstract_headers,
            claims_headers.clone(),
            section_headers,
        )
        .with_paragraph_break_window(options.paragraph_break_window);

        Ok(Self {
            claims_headers,
            abstracts,
            abstract_priority: options.abstract_priority,
        })
    }

    pub fn with_abstract_priority(mut self, priority: AbstractPriority) -> Self {
        self.abstract_priority = priority;
        self
    }

    pub fn abstract_priority(&self) -> AbstractPriority {
        self.abstract_priority
    }

    pub fn abstracts(&self) -> &AbstractExtractor {
        &self.abstracts
    }

    /// Decide which path `text` takes
    pub fn state(&self, text: &str) -> SplitState {
        match self.claims_headers.find(text) {
            Some(header) => {
                log::debug!(
                    "claims header '{}' at {}..{}",
                    header.pattern,
                    header.start,
                    header.end
                );
                SplitState::ClaimsHeaderFound {
                    header: SectionSpan::new(header.start, header.end),
                }
            }
            None => SplitState::NoClaimsHeader,
        }
    }

    /// Split cleaned text into its sections
    pub fn split(&self, text: &str) -> PatentSections {
        match self.state(text) {
            SplitState::NoClaimsHeader => {
                if !text.trim().is_empty() {
                    log::warn!("no claims header found, treating the whole text as description");
                }
                let (description, abstract_text) = self.abstracts.extract_abstract(text);
                PatentSections::new(description.trim(), None, abstract_text)
            }
            SplitState::ClaimsHeaderFound { header } => {
                let (prefix, tail) = text.split_at(header.start);
                let (claims, trailing) = self.abstracts.strip_trailing_abstract(tail);
                let (description, leading) = self.abstracts.extract_abstract(prefix);
                if leading.is_some() && trailing.is_some() {
                    log::debug!(
                        "abstracts found before and after claims, keeping the {} one",
                        self.abstract_priority
                    );
                }
                let abstract_text = self.abstract_priority.choose(leading, trailing);
                PatentSections::new(
                    description.trim(),
                    Some(claims.trim().to_string()),
                    abstract_text,
                )
            }
        }
    }
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_detection() {
        let splitter = SectionSplitter::new();
        assert_eq!(splitter.state("no header"), SplitState::NoClaimsHeader);
        assert_eq!(
            splitter.state("Intro\nClaims\n1."),
            SplitState::ClaimsHeaderFound {
                header: SectionSpan::new(6, 12)
            }
        );
    }

    #[test]
    fn test_split_with_explicit_claims() {
        let sections = split_sections("Background text.\n\nClaims\n1. A widget.");
        assert_eq!(sections.description, "Background text.");
        assert_eq!(sections.claims.as_deref(), Some("Claims\n1. A widget."));
        assert_eq!(sections.abstract_text, None);
    }

    #[test]
    fn test_leading_priority() {
        let text = "Abstract\nLeading one.\n\nBody.\n\nClaims\n1. X.\n\nAbstract\nTrailing one.";
        let trailing = SectionSplitter::new().split(text);
        assert_eq!(trailing.abstract_text.as_deref(), Some("Trailing one."));

        let leading = SectionSplitter::new()
            .with_abstract_priority(AbstractPriority::Leading)
            .split(text);
        assert_eq!(leading.abstract_text.as_deref(), Some("Leading one."));
        assert_eq!(leading.description, "Body.");
        assert_eq!(leading.claims.as_deref(), Some("Claims\n1. X."));
    }

    #[test]
    fn test_priority_falls_back_to_other_side() {
        assert_eq!(
            AbstractPriority::Leading.choose(None, Some("t".into())),
            Some("t".to_string())
        );
        assert_eq!(
            AbstractPriority::Trailing.choose(Some("l".into()), None),
            Some("l".to_string())
        );
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(
            "Leading".parse::<AbstractPriority>(),
            Ok(AbstractPriority::Leading)
        );
        assert_eq!(
            " trailing ".parse::<AbstractPriority>(),
            Ok(AbstractPriority::Trailing)
        );
        assert!("middle".parse::<AbstractPriority>().is_err());
    }

    #[test]
    fn test_with_options_extra_headers() {
        let options = SplitOptions {
            extra_claims_headers: vec!["revendications".into()],
            extra_abstract_headers: vec!["abr[ée]g[ée]".into()],
            ..SplitOptions::default()
        };
        let splitter = SectionSplitter::with_options(&options).unwrap();
        let sections =
            splitter.split("Description.\n\nRevendications\n1. X.\n\nAbrégé\nRésumé court.");
        assert_eq!(sections.description, "Description.");
        assert_eq!(sections.claims.as_deref(), Some("Revendications\n1. X."));
        assert_eq!(sections.abstract_text.as_deref(), Some("Résumé court."));
    }

    #[test]
    fn test_with_options_rejects_bad_pattern() {
        let options = SplitOptions {
            extra_section_headers: vec!["[".into()],
            ..SplitOptions::default()
        };
        assert!(SectionSplitter::with_options(&options).is_err());
    }

    #[test]
    fn test_inline_abstract_with_qualifier() {
        let sections = split_sections("Abstract of the disclosure: A lid.\n\nBody.");
        assert_eq!(sections.abstract_text.as_deref(), Some("A lid."));
        assert_eq!(sections.description, "Body.");

        let sections = split_sections("Body.\n\nClaims\n1. X.\n\nABSTRACT OF THE INVENTION: A lid.");
        assert_eq!(sections.claims.as_deref(), Some("Claims\n1. X."));
        assert_eq!(sections.abstract_text.as_deref(), Some("A lid."));
    }

    #[test]
    fn test_inline_abstract_with_dash_separator() {
        let sections = split_sections("Abstract -- A device.\n\nBody.");
        assert_eq!(sections.abstract_text.as_deref(), Some("A device."));
        assert_eq!(sections.description, "Body.");
    }

    #[test]
    fn test_crlf_text_without_normalization() {
        let sections = split_sections("Body\r\nClaims\r\n1. X");
        assert_eq!(sections.description, "Body");
        assert_eq!(sections.claims.as_deref(), Some("Claims\r\n1. X"));
    }

    #[test]
    fn test_claims_header_at_start() {
        let sections = split_sections("What is claimed is:\n1. A lever.");
        assert_eq!(sections.description, "");
        assert_eq!(
            sections.claims.as_deref(),
            Some("What is claimed is:\n1. A lever.")
        );
    }
}
