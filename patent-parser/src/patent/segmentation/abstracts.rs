//! Abstract extraction
//!
//! An abstract shows up in one of two places in OCR output: near the top of the document (before
//! the description, or between description and claims), or after the claims. Both are handled
//! here:
//!
//! - [`AbstractExtractor::extract_abstract`] finds an abstract header in a block of text and cuts
//!   the abstract out of it. The end of the abstract is the first of: the next claims header, the
//!   next description section word on its own line, a paragraph break close to the abstract
//!   start, or the end of the text.
//! - [`AbstractExtractor::strip_trailing_abstract`] cuts everything from an abstract header to the
//!   end of a claims block.
//!
//! An abstract header followed by nothing but whitespace is not an abstract: the text comes back
//! unchanged.

use super::headers::HeaderMatcher;
use crate::patent::sections::SectionSpan;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default distance, in characters, within which a paragraph break ends an abstract
pub const DEFAULT_PARAGRAPH_BREAK_WINDOW: usize = 500;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// What ended an abstract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractBoundary {
    ClaimsHeader,
    SectionHeader,
    ParagraphBreak,
    EndOfText,
}

/// Locates and removes abstracts
#[derive(Debug, Clone)]
pub struct AbstractExtractor {
    abstract_headers: HeaderMatcher,
    claims_headers: HeaderMatcher,
    section_headers: HeaderMatcher,
    paragraph_break_window: usize,
}

impl AbstractExtractor {
    /// An extractor with the built-in header sets
    pub fn new() -> Self {
        Self {
            abstract_headers: HeaderMatcher::abstracts(),
            claims_headers: HeaderMatcher::claims(),
            section_headers: HeaderMatcher::sections(),
            paragraph_break_window: DEFAULT_PARAGRAPH_BREAK_WINDOW,
        }
    }

    pub fn with_matchers(
        abstract_headers: HeaderMatcher,
        claims_headers: HeaderMatcher,
        section_headers: HeaderMatcher,
    ) -> Self {
        Self {
            abstract_headers,
            claims_headers,
            section_headers,
            paragraph_break_window: DEFAULT_PARAGRAPH_BREAK_WINDOW,
        }
    }

    pub fn with_paragraph_break_window(mut self, window: usize) -> Self {
        self.paragraph_break_window = window;
        self
    }

    pub fn abstract_headers(&self) -> &HeaderMatcher {
        &self.abstract_headers
    }

    /// Cut the first abstract out of `text`
    ///
    /// Returns the text without the abstract header and body, and the abstract itself. When there
    /// is no abstract header, or the abstract would be empty, `text` is returned as-is with
    /// `None`.
    pub fn extract_abstract(&self, text: &str) -> (String, Option<String>) {
        let Some(header) = self.abstract_headers.find(text) else {
            return (text.to_string(), None);
        };

        let start = header.end;
        let (end, boundary) = self.abstract_end(text, start);
        let body = SectionSpan::new(start, end).slice(text);
        if body.is_empty() {
            log::debug!(
                "abstract header '{}' at {} has no body, ignoring",
                header.pattern,
                header.start
            );
            return (text.to_string(), None);
        }

        log::debug!(
            "abstract '{}' spans {}..{} ({:?})",
            header.pattern,
            start,
            end,
            boundary
        );
        let abstract_text = body.to_string();
        let remainder = SectionSpan::new(header.start, end).excise(text);
        (remainder, Some(abstract_text))
    }

    /// Cut a trailing abstract off a claims block
    ///
    /// Everything from the abstract header to the end of `claims` goes; what followed the header
    /// becomes the abstract.
    pub fn strip_trailing_abstract(&self, claims: &str) -> (String, Option<String>) {
        let Some(header) = self.abstract_headers.find(claims) else {
            return (claims.to_string(), None);
        };

        log::debug!(
            "trailing abstract '{}' found at {} of claims",
            header.pattern,
            header.start
        );
        let kept = claims[..header.start].trim().to_string();
        let abstract_text = claims[header.end..].trim();
        let abstract_text = (!abstract_text.is_empty()).then(|| abstract_text.to_string());
        (kept, abstract_text)
    }

    /// Where an abstract starting at `start` ends
    pub fn abstract_end(&self, text: &str, start: usize) -> (usize, AbstractBoundary) {
        if let Some(claims) = self.claims_headers.find_from(text, start) {
            return (claims.start, AbstractBoundary::ClaimsHeader);
        }
        if let Some(section) = self.section_headers.find_from(text, start) {
            return (section.start, AbstractBoundary::SectionHeader);
        }

        let rest = &text[start..];
        let body_start = start + (rest.len() - rest.trim_start().len());
        if let Some(brk) = PARAGRAPH_BREAK.find_at(text, body_start) {
            let distance = text[start..brk.start()].chars().count();
            if distance <= self.paragraph_break_window {
                return (brk.start(), AbstractBoundary::ParagraphBreak);
            }
        }
        (text.len(), AbstractBoundary::EndOfText)
    }
}

impl Default for AbstractExtractor {
    fn default() -> Self {
        Self::new()
    }
}
