//! Property-based tests for cleaning and splitting
//!
//! - Line-number stripping is idempotent.
//! - Cleaning and splitting are total: any input produces a result.
//! - Splitting never invents text: every non-whitespace character in the sections comes from
//!   the cleaned input.

use patent_parser::patent::cleaning::{clean_text, strip_line_numbers};
use patent_parser::patent::split_sections;
use proptest::prelude::*;
use std::collections::HashMap;

/// Lines that look like what OCR engines emit for patents
fn patent_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Section headers
        Just("Claims".to_string()),
        Just("What is claimed is:".to_string()),
        Just("ABSTRACT".to_string()),
        Just("Abstract: a short summary".to_string()),
        Just("Background".to_string()),
        Just("## Detailed Description".to_string()),
        // Margin numbers and numbered claims
        "[0-9]{1,3} [a-z ]{0,20}",
        "[1-9]\\. [a-z ]{1,20}",
        // Markup
        Just("![](images/a1b2.jpg)".to_string()),
        Just("<table><tr><td>a</td><td>b</td></tr></table>".to_string()),
        // Prose
        "[A-Za-z][A-Za-z ,.]{0,40}",
        Just(String::new()),
    ]
}

fn patent_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(patent_line_strategy(), 0..30).prop_map(|lines| lines.join("\n"))
}

fn non_whitespace_counts(texts: &[&str]) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for text in texts {
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            *counts.entry(c).or_insert(0) += 1;
        }
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn line_number_stripping_is_idempotent(text in "([0-9 \t]{0,6}[a-z0-9 ]{0,10}\n?){0,8}") {
        let once = strip_line_numbers(&text);
        let twice = strip_line_numbers(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn line_number_stripping_is_idempotent_on_any_text(text in "\\PC*") {
        let once = strip_line_numbers(&text);
        prop_assert_eq!(strip_line_numbers(&once), once);
    }

    #[test]
    fn cleaning_and_splitting_are_total(text in "\\PC*") {
        let cleaned = clean_text(&text);
        let sections = split_sections(&cleaned);
        prop_assert_eq!(sections.description.trim(), sections.description.as_str());
    }

    #[test]
    fn split_never_invents_text(text in patent_text_strategy()) {
        let cleaned = clean_text(&text);
        let sections = split_sections(&cleaned);

        let source = non_whitespace_counts(&[&cleaned]);
        let produced = non_whitespace_counts(&[
            &sections.description,
            sections.claims.as_deref().unwrap_or_default(),
            sections.abstract_text.as_deref().unwrap_or_default(),
        ]);
        for (c, count) in produced {
            let available = source.get(&c).copied().unwrap_or(0);
            prop_assert!(
                count <= available,
                "{:?} appears {} times in sections but {} times in {:?}",
                c, count, available, cleaned
            );
        }
    }

    #[test]
    fn claims_start_with_a_header(text in patent_text_strategy()) {
        let sections = split_sections(&clean_text(&text));
        if let Some(claims) = sections.claims {
            prop_assert!(!claims.is_empty());
            prop_assert!(
                claims.to_lowercase().contains("claim"),
                "claims without a header: {:?}",
                claims
            );
        }
    }
}
