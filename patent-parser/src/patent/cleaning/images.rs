//! Image links and figure captions
//!
//! Layout engines replace every figure with a markdown image link pointing into their `images/`
//! output folder, usually followed by a caption line that only repeats the figure number. Neither
//! carries text worth keeping. Removing them leaves runs of empty lines, which are collapsed to a
//! single blank line.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(images/.*?\)").unwrap());

static FIGURE_CAPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:figure|fig\.?)[ \t]*\d+[a-z]?[ \t]*$").unwrap()
});

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap());

/// Remove image links and bare figure-caption lines, then collapse the blank runs left behind
pub fn strip_image_links(text: &str) -> String {
    let without_links = IMAGE_LINK.replace_all(text, "");
    let without_captions = FIGURE_CAPTION.replace_all(&without_links, "");
    collapse_blank_lines(&without_captions)
}

/// Replace three or more consecutive line breaks with exactly one blank line
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}
