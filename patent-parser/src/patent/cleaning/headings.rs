//! Line endings and markdown heading markers
//!
//! Layout engines emit markdown, so a claims header often arrives as `## CLAIMS`. The header
//! matchers anchor on whole lines, which means the markers have to go first. Line endings are
//! normalized for the same reason: a stray `\r` keeps `$` from matching at the end of a line.
//!
//! Only a `#` run at the start of a line is a marker. A `#` anywhere else is content and stays:
//! claims cite each other as `claim #3`, and part numbers such as `#10-32` appear in descriptions.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#+[ \t]*").unwrap());

/// Convert `\r\n` and lone `\r` to `\n`
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Remove `#` heading markers (and the spaces around them) at the start of every line
pub fn strip_heading_markers(text: &str) -> String {
    HEADING_MARKER.replace_all(text, "").into_owned()
}
