//! Rendering of split results for the terminal
//!
//! `text` is for people, `json` and `yaml` for scripts. Structured formats print absent sections
//! as `null`.

use patent_parser::patent::{PatentSections, Slot};

/// All output formats the CLI accepts
pub const OUTPUT_FORMATS: &[&str] = &["text", "json", "yaml"];

/// Render `sections` in the named format
pub fn render_sections(sections: &PatentSections, format: &str) -> Result<String, String> {
    match format {
        "text" => Ok(render_text(sections)),
        "json" => serde_json::to_string_pretty(sections)
            .map(|json| format!("{}\n", json))
            .map_err(|e| format!("JSON serialization failed: {}", e)),
        "yaml" => serde_yaml::to_string(sections)
            .map_err(|e| format!("YAML serialization failed: {}", e)),
        other => Err(format!(
            "Unknown output format '{}' (available: {})",
            other,
            OUTPUT_FORMATS.join(", ")
        )),
    }
}

fn render_text(sections: &PatentSections) -> String {
    let mut out = String::new();
    for slot in [Slot::Description, Slot::Claims, Slot::Abstract] {
        out.push_str(&format!("[{}]\n", slot));
        match sections.get(slot) {
            Some(text) if !text.is_empty() => out.push_str(text),
            Some(_) => out.push_str("(empty)"),
            None => out.push_str("(none)"),
        }
        out.push_str("\n\n");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}
