//! Section data model
//!
//! `PatentSections` is the only value that leaves the splitter. `SectionSpan` exists while a
//! split is being computed and is never stored. `Slot` names the fixed output slots a caller may
//! persist sections into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The three semantic sections of one patent document.
///
/// `claims` and `abstract_text` are either non-empty or `None`. `description` is always present
/// and may be empty (e.g. when the whole document was an abstract followed by claims).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentSections {
    pub description: String,
    pub claims: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl PatentSections {
    pub fn new(
        description: impl Into<String>,
        claims: Option<String>,
        abstract_text: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            claims: non_empty(claims),
            abstract_text: non_empty(abstract_text),
        }
    }

    /// Text held in `slot`, if this record carries it.
    ///
    /// The drawings slot is produced by a separate read and is never part of a split.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Description => Some(self.description.as_str()),
            Slot::Claims => self.claims.as_deref(),
            Slot::Abstract => self.abstract_text.as_deref(),
            Slot::Drawings => None,
        }
    }

    pub fn has_claims(&self) -> bool {
        self.claims.is_some()
    }

    pub fn has_abstract(&self) -> bool {
        self.abstract_text.is_some()
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Half-open byte range `[start, end)` into cleaned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub start: usize,
    pub end: usize,
}

impl SectionSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} past end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The spanned text, trimmed.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text[self.range()].trim()
    }

    /// `text` with this span cut out; the two remaining halves are joined directly and trimmed.
    pub fn excise(&self, text: &str) -> String {
        let mut remainder = String::with_capacity(text.len() - self.len());
        remainder.push_str(&text[..self.start]);
        remainder.push_str(&text[self.end..]);
        remainder.trim().to_string()
    }
}

impl From<Range<usize>> for SectionSpan {
    fn from(range: Range<usize>) -> Self {
        SectionSpan::new(range.start, range.end)
    }
}

/// Fixed names under which sections may be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Description,
    Claims,
    Abstract,
    Drawings,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Description, Slot::Claims, Slot::Abstract, Slot::Drawings];

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Description => "description",
            Slot::Claims => "claims",
            Slot::Abstract => "abstract",
            Slot::Drawings => "drawings",
        }
    }

    /// File name used by directory-backed sinks.
    pub fn file_name(&self) -> String {
        format!("{}_text.txt", self.name())
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_drops_blank_optional_sections() {
        let sections = PatentSections::new("desc", Some("  \n".into()), Some("".into()));
        assert_eq!(sections.claims, None);
        assert_eq!(sections.abstract_text, None);
        assert_eq!(sections.description, "desc");
    }

    #[test]
    fn test_get_by_slot() {
        let sections = PatentSections::new("d", Some("c".into()), Some("a".into()));
        assert_eq!(sections.get(Slot::Description), Some("d"));
        assert_eq!(sections.get(Slot::Claims), Some("c"));
        assert_eq!(sections.get(Slot::Abstract), Some("a"));
        assert_eq!(sections.get(Slot::Drawings), None);
    }

    #[test]
    fn test_span_excise_joins_without_gap() {
        let text = "before [cut] after";
        let span = SectionSpan::new(7, 13);
        assert_eq!(span.slice(text), "[cut]");
        assert_eq!(span.excise(text), "before after");
    }

    #[test]
    fn test_slot_names_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_name(slot.name()), Some(slot));
        }
        assert_eq!(Slot::from_name("CLAIMS"), Some(Slot::Claims));
        assert_eq!(Slot::from_name("figures"), None);
        assert_eq!(Slot::Description.file_name(), "description_text.txt");
    }

    #[test]
    fn test_abstract_serializes_under_keyword_name() {
        let sections = PatentSections::new("d", None, Some("a".into()));
        let json = serde_json::to_value(&sections).unwrap();
        assert_eq!(json["abstract"], "a");
        assert!(json["claims"].is_null());
    }
}
