//! Section header matchers
//!
//! A header is a line whose only content is one of a fixed set of phrasings, matched
//! case-insensitively, optionally indented and optionally closed by `:` or `.`. A `\r` left at the
//! end of a line is tolerated. The phrasings
//! are data: each matcher is an ordered list of [`HeaderPattern`]s compiled into line-anchored
//! regular expressions, so other jurisdictions' wording is added by appending patterns rather
//! than by writing new scanning code.
//!
//! Two line shapes exist:
//!
//! - [`LineShape::WholeLine`]: the phrase is the whole line (`CLAIMS`, `What is claimed is:`).
//! - [`LineShape::LinePrefix`]: the phrase opens a line and text follows on the same line
//!   (`Abstract: A device for...`, `Abstract -- A device for...`). Only the phrase and its run of
//!   separators count as the header; the text after it is left for the section body.
//!
//! Lookups are leftmost-first over all patterns. When two patterns match at the same position
//! the one listed first wins.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// A header phrase failed to compile
#[derive(Debug, Error)]
#[error("invalid header pattern '{name}': {source}")]
pub struct PatternError {
    pub name: String,
    #[source]
    pub source: regex::Error,
}

/// How a header phrase sits on its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    WholeLine,
    LinePrefix,
}

/// One header phrasing
///
/// `phrase` is a regular-expression fragment. Separate words with `[ \t]+` rather than `\s+` so
/// a phrase can never run across a line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPattern {
    pub name: String,
    pub phrase: String,
    pub shape: LineShape,
}

impl HeaderPattern {
    pub fn whole_line(name: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phrase: phrase.into(),
            shape: LineShape::WholeLine,
        }
    }

    pub fn line_prefix(name: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phrase: phrase.into(),
            shape: LineShape::LinePrefix,
        }
    }

    fn regex_source(&self) -> String {
        match self.shape {
            LineShape::WholeLine => {
                format!(r"(?im)^[ \t]*(?:{})[ \t]*[:.]?[ \t]*\r?$", self.phrase)
            }
            LineShape::LinePrefix => format!(
                r"(?im)^[ \t]*(?:{})\b(?:[ \t]*[:.\-–—])*[ \t]*(?P<body>[^\s:.\-–—])",
                self.phrase
            ),
        }
    }

    fn compile(&self) -> Result<CompiledPattern, PatternError> {
        let regex = Regex::new(&self.regex_source()).map_err(|source| PatternError {
            name: self.name.clone(),
            source,
        })?;
        Ok(CompiledPattern {
            name: self.name.clone(),
            shape: self.shape,
            regex,
        })
    }
}

/// Built-in claims header phrasings
pub fn claims_patterns() -> Vec<HeaderPattern> {
    vec![
        HeaderPattern::whole_line("claims", r"claims?"),
        HeaderPattern::whole_line("what-is-claimed", r"what[ \t]+is[ \t]+claimed(?:[ \t]+is)?"),
        HeaderPattern::whole_line("what-we-claim", r"what[ \t]+we[ \t]+claim(?:[ \t]+is)?"),
        HeaderPattern::whole_line("i-claim", r"i[ \t]+claim"),
        HeaderPattern::whole_line("we-claim", r"we[ \t]+claim"),
    ]
}

/// Built-in abstract header phrasings
pub fn abstract_patterns() -> Vec<HeaderPattern> {
    vec![
        HeaderPattern::whole_line("abstract", r"abstract"),
        HeaderPattern::whole_line(
            "abstract-of-the-disclosure",
            r"abstract[ \t]+of[ \t]+the[ \t]+disclosure",
        ),
        HeaderPattern::whole_line(
            "abstract-of-the-invention",
            r"abstract[ \t]+of[ \t]+the[ \t]+invention",
        ),
        HeaderPattern::line_prefix(
            "abstract-inline",
            r"abstract(?:[ \t]+of[ \t]+the[ \t]+(?:disclosure|invention))?",
        ),
    ]
}

/// Built-in description section words that close an abstract
pub fn section_patterns() -> Vec<HeaderPattern> {
    vec![
        HeaderPattern::whole_line("description", r"description"),
        HeaderPattern::whole_line("background", r"background"),
        HeaderPattern::whole_line("summary", r"summary"),
        HeaderPattern::whole_line("detailed-description", r"detailed[ \t]+description"),
        HeaderPattern::whole_line("brief-description", r"brief[ \t]+description"),
    ]
}

static CLAIMS_HEADERS: Lazy<HeaderMatcher> =
    Lazy::new(|| HeaderMatcher::new(&claims_patterns()).unwrap());

static ABSTRACT_HEADERS: Lazy<HeaderMatcher> =
    Lazy::new(|| HeaderMatcher::new(&abstract_patterns()).unwrap());

static SECTION_HEADERS: Lazy<HeaderMatcher> =
    Lazy::new(|| HeaderMatcher::new(&section_patterns()).unwrap());

#[derive(Debug, Clone)]
struct CompiledPattern {
    name: String,
    shape: LineShape,
    regex: Regex,
}

impl CompiledPattern {
    fn find_at(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        match self.shape {
            LineShape::WholeLine => self
                .regex
                .find_at(text, offset)
                .map(|m| (m.start(), m.end())),
            LineShape::LinePrefix => {
                let caps = self.regex.captures_at(text, offset)?;
                let whole = caps.get(0)?;
                let body = caps.name("body")?;
                Some((whole.start(), body.start()))
            }
        }
    }
}

/// Where a header was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'m> {
    /// Byte offset of the start of the header line
    pub start: usize,
    /// Byte offset just past the header (and past its punctuation)
    pub end: usize,
    /// Name of the pattern that matched
    pub pattern: &'m str,
}

/// An ordered set of header patterns
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    patterns: Vec<CompiledPattern>,
}

impl HeaderMatcher {
    /// Compile `patterns`, keeping their order
    pub fn new(patterns: &[HeaderPattern]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(HeaderPattern::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// The built-in claims header matcher
    pub fn claims() -> Self {
        CLAIMS_HEADERS.clone()
    }

    /// The built-in abstract header matcher
    pub fn abstracts() -> Self {
        ABSTRACT_HEADERS.clone()
    }

    /// The built-in description section-word matcher
    pub fn sections() -> Self {
        SECTION_HEADERS.clone()
    }

    /// Append whole-line patterns built from plain phrase fragments
    ///
    /// Extra patterns rank after the existing ones when two match at the same position.
    pub fn extended<S: AsRef<str>>(mut self, phrases: &[S]) -> Result<Self, PatternError> {
        for (index, phrase) in phrases.iter().enumerate() {
            let pattern = HeaderPattern::whole_line(format!("extra-{}", index), phrase.as_ref());
            self.patterns.push(pattern.compile()?);
        }
        Ok(self)
    }

    /// Names of the patterns, in priority order
    pub fn pattern_names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }

    /// First header starting at or after `offset`
    pub fn find_from(&self, text: &str, offset: usize) -> Option<HeaderMatch<'_>> {
        if offset > text.len() {
            return None;
        }
        let mut offset = offset;
        while !text.is_char_boundary(offset) {
            offset += 1;
        }

        let mut best: Option<HeaderMatch<'_>> = None;
        for pattern in &self.patterns {
            if let Some((start, end)) = pattern.find_at(text, offset) {
                if best.map_or(true, |b| start < b.start) {
                    best = Some(HeaderMatch {
                        start,
                        end,
                        pattern: &pattern.name,
                    });
                }
            }
        }
        best
    }

    /// First header anywhere in `text`
    pub fn find(&self, text: &str) -> Option<HeaderMatch<'_>> {
        self.find_from(text, 0)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CLAIMS")]
    #[case("Claims")]
    #[case("claim")]
    #[case("Claims:")]
    #[case("  Claims.  ")]
    #[case("What is claimed is:")]
    #[case("WHAT IS CLAIMED")]
    #[case("What we claim is")]
    #[case("I claim:")]
    #[case("We claim:")]
    fn test_claims_header_matches(#[case] line: &str) {
        let text = format!("Some description.\n{}\n1. A widget.", line);
        let matcher = HeaderMatcher::claims();
        let found = matcher.find(&text).expect("claims header");
        assert_eq!(found.start, "Some description.\n".len());
    }

    #[rstest]
    #[case("Claim 1 is broad.")]
    #[case("The claims are broad.")]
    #[case("claims 1-3")]
    #[case("What is claimed is a widget.")]
    #[case("Reclaim")]
    fn test_claims_header_rejects(#[case] line: &str) {
        assert!(HeaderMatcher::claims().find(line).is_none());
    }

    #[rstest]
    #[case("Abstract", "abstract")]
    #[case("ABSTRACT OF THE DISCLOSURE", "abstract-of-the-disclosure")]
    #[case("Abstract of the Invention:", "abstract-of-the-invention")]
    #[case("Abstract:", "abstract")]
    #[case("Abstract: A small device.", "abstract-inline")]
    #[case("Abstract\r", "abstract")]
    fn test_abstract_header_matches(#[case] line: &str, #[case] pattern: &str) {
        let matcher = HeaderMatcher::abstracts();
        let found = matcher.find(line).expect("abstract header");
        assert_eq!(found.start, 0);
        assert_eq!(found.pattern, pattern);
    }

    #[rstest]
    #[case("Abstract: A lid.")]
    #[case("ABSTRACT OF THE DISCLOSURE: A lid.")]
    #[case("Abstract of the invention. A lid.")]
    #[case("Abstract -- A lid.")]
    #[case("Abstract — A lid.")]
    #[case("Abstract: - A lid.")]
    fn test_inline_abstract_header_consumes_qualifier_and_separators(#[case] line: &str) {
        let matcher = HeaderMatcher::abstracts();
        let found = matcher.find(line).expect("abstract header");
        assert_eq!(found.pattern, "abstract-inline");
        assert_eq!(&line[found.end..], "A lid.");
    }

    #[test]
    fn test_crlf_header_line() {
        let text = "Body\r\nClaims\r\n1. X";
        let matcher = HeaderMatcher::claims();
        let found = matcher.find(text).expect("claims header");
        assert_eq!(found.start, "Body\r\n".len());
    }

    #[test]
    fn test_inline_abstract_header_ends_before_body() {
        let text = "Abstract: A small device.";
        let matcher = HeaderMatcher::abstracts();
        let found = matcher.find(text).unwrap();
        assert_eq!(&text[found.end..], "A small device.");
    }

    #[test]
    fn test_abstract_word_inside_line_not_matched() {
        assert!(HeaderMatcher::abstracts()
            .find("An abstract idea.\nAbstracted data")
            .is_none());
    }

    #[test]
    fn test_find_from_advances() {
        let text = "Claims\n1. A.\nClaims\n2. B.";
        let claims = HeaderMatcher::claims();
        let first = claims.find(text).unwrap();
        assert_eq!(first.start, 0);
        let second = claims.find_from(text, first.end).unwrap();
        assert_eq!(second.start, text.rfind("Claims").unwrap());
        assert!(claims.find_from(text, second.end).is_none());
    }

    #[test]
    fn test_find_from_past_end() {
        assert!(HeaderMatcher::claims().find_from("Claims", 100).is_none());
    }

    #[test]
    fn test_find_from_inside_multibyte_char() {
        let text = "é\nClaims";
        let matcher = HeaderMatcher::claims();
        let found = matcher.find_from(text, 1).unwrap();
        assert_eq!(found.start, 3);
    }

    #[test]
    fn test_header_anchor_does_not_span_lines() {
        assert!(HeaderMatcher::claims().find("what is\nclaimed").is_none());
    }

    #[test]
    fn test_section_words() {
        let sections = HeaderMatcher::sections();
        assert!(sections.is_match("x\nDETAILED DESCRIPTION\ny"));
        assert!(sections.is_match("Background"));
        assert!(!sections.is_match("Background of the art is long."));
    }

    #[test]
    fn test_extended_patterns() {
        let claims = HeaderMatcher::claims()
            .extended(&["patentansprüche", "revendications"])
            .unwrap();
        assert!(claims.is_match("Patentansprüche"));
        assert!(claims.is_match("REVENDICATIONS :"));
        assert_eq!(claims.pattern_names().len(), 7);
    }

    #[test]
    fn test_invalid_extra_pattern() {
        let err = HeaderMatcher::claims().extended(&["(unclosed"]).unwrap_err();
        assert_eq!(err.name, "extra-0");
        assert!(err.to_string().starts_with("invalid header pattern 'extra-0'"));
    }

    #[test]
    fn test_earlier_pattern_wins_tie() {
        let matcher = HeaderMatcher::new(&[
            HeaderPattern::whole_line("first", "claims"),
            HeaderPattern::whole_line("second", "claims?"),
        ])
        .unwrap();
        assert_eq!(matcher.find("Claims").unwrap().pattern, "first");
    }
}
