//! Testing utilities
//!
//! Two things live here: a small library of sample documents, and a fluent assertion API over
//! [`PatentSections`].
//!
//! ## Samples
//!
//! OCR output for patents has a lot of small quirks (margin numbers, heading markers, HTML tables,
//! image links). Hand-typing that into every test drifts from what engines really emit, so the
//! samples are kept as files under `tests/fixtures` and loaded through [`PatentSamples`]:
//!
//! ```rust-example
//! let raw = PatentSamples::get("ep_abstract_first.md").unwrap();
//! let doc = DocumentReader::new().process(raw);
//! ```
//!
//! ## Assertions
//!
//! ```rust-example
//! assert_sections(&doc.sections)
//!     .description_starts_with("SEALING RING")
//!     .claims_eq("Claims\n\n1. A sealing ring having a rubber lip.")
//!     .abstract_eq("A sealing ring for a pump shaft has a lip of soft rubber.");
//! ```

use crate::patent::sections::PatentSections;

const SAMPLES: &[(&str, &str)] = &[
    (
        "us_claims_then_abstract.md",
        include_str!("../../tests/fixtures/us_claims_then_abstract.md"),
    ),
    (
        "ep_abstract_first.md",
        include_str!("../../tests/fixtures/ep_abstract_first.md"),
    ),
    ("no_claims.md", include_str!("../../tests/fixtures/no_claims.md")),
    ("drawings.md", include_str!("../../tests/fixtures/drawings.md")),
];

/// Curated sample documents
pub struct PatentSamples;

impl PatentSamples {
    pub fn get(name: &str) -> Option<&'static str> {
        SAMPLES
            .iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, text)| *text)
    }

    pub fn names() -> Vec<&'static str> {
        SAMPLES.iter().map(|(name, _)| *name).collect()
    }
}

/// Create an assertion builder for a split result
pub fn assert_sections(sections: &PatentSections) -> SectionsAssertion<'_> {
    SectionsAssertion { sections }
}

pub struct SectionsAssertion<'a> {
    sections: &'a PatentSections,
}

impl<'a> SectionsAssertion<'a> {
    pub fn description_eq(self, expected: &str) -> Self {
        assert_eq!(
            self.sections.description, expected,
            "description mismatch in {:#?}",
            self.sections
        );
        self
    }

    pub fn description_starts_with(self, prefix: &str) -> Self {
        assert!(
            self.sections.description.starts_with(prefix),
            "description does not start with {:?}: {:?}",
            prefix,
            self.sections.description
        );
        self
    }

    pub fn description_contains(self, needle: &str) -> Self {
        assert!(
            self.sections.description.contains(needle),
            "description does not contain {:?}: {:?}",
            needle,
            self.sections.description
        );
        self
    }

    pub fn description_lacks(self, needle: &str) -> Self {
        assert!(
            !self.sections.description.contains(needle),
            "description unexpectedly contains {:?}: {:?}",
            needle,
            self.sections.description
        );
        self
    }

    pub fn claims_eq(self, expected: &str) -> Self {
        assert_eq!(
            self.sections.claims.as_deref(),
            Some(expected),
            "claims mismatch in {:#?}",
            self.sections
        );
        self
    }

    pub fn no_claims(self) -> Self {
        assert!(
            self.sections.claims.is_none(),
            "expected no claims, found {:?}",
            self.sections.claims
        );
        self
    }

    pub fn abstract_eq(self, expected: &str) -> Self {
        assert_eq!(
            self.sections.abstract_text.as_deref(),
            Some(expected),
            "abstract mismatch in {:#?}",
            self.sections
        );
        self
    }

    pub fn no_abstract(self) -> Self {
        assert!(
            self.sections.abstract_text.is_none(),
            "expected no abstract, found {:?}",
            self.sections.abstract_text
        );
        self
    }
}
