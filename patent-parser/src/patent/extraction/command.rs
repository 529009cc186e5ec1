//! External document-parsing engine adapter
//!
//! Runs a program such as the MinerU CLI once per document. The argument list is a template:
//! `{input}` is replaced by the document path and `{output}` by a fresh temporary directory. When
//! the program exits successfully, the first markdown file found under the output directory is
//! the extracted text. Layout side files (`*_layout.md`) are skipped.

use super::{ExtractionError, InputFormat, TextExtractor};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const INPUT_PLACEHOLDER: &str = "{input}";
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

const DEFAULT_FORMATS: &[InputFormat] = &[InputFormat::Pdf, InputFormat::Docx, InputFormat::Image];

#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
    formats: Vec<InputFormat>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            formats: DEFAULT_FORMATS.to_vec(),
        }
    }

    /// `mineru -p {input} -o {output}`
    pub fn mineru() -> Self {
        Self::new(
            "mineru",
            vec![
                "-p".to_string(),
                INPUT_PLACEHOLDER.to_string(),
                "-o".to_string(),
                OUTPUT_PLACEHOLDER.to_string(),
            ],
        )
    }

    pub fn with_formats(mut self, formats: Vec<InputFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument list with placeholders filled in
    pub fn render_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }

    fn resolve_program(&self) -> Result<PathBuf, ExtractionError> {
        which::which(&self.program)
            .map_err(|_| ExtractionError::EngineUnavailable(self.program.clone()))
    }
}

impl TextExtractor for CommandExtractor {
    fn name(&self) -> &str {
        &self.program
    }

    fn formats(&self) -> &[InputFormat] {
        &self.formats
    }

    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }
        let program = self.resolve_program()?;
        let workdir = tempfile::tempdir()?;
        let args = self.render_args(path, workdir.path());

        log::debug!("running {} {:?}", program.display(), args);
        let output = Command::new(&program).args(&args).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ExtractionError::EngineFailed {
                engine: self.program.clone(),
                message,
            });
        }

        let markdown = find_markdown(workdir.path())?
            .ok_or_else(|| ExtractionError::NoOutput(path.to_path_buf()))?;
        log::debug!("reading extracted markdown from {}", markdown.display());
        let bytes = fs::read(&markdown)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// First `*.md` file under `dir` that is not a layout file, in sorted walk order
pub fn find_markdown(dir: &Path) -> Result<Option<PathBuf>, ExtractionError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in &entries {
        if path.is_file() && is_content_markdown(path) {
            return Ok(Some(path.clone()));
        }
    }
    for path in &entries {
        if path.is_dir() {
            if let Some(found) = find_markdown(path)? {
                return Ok(Some(found));
            }
        }
    }
    Ok(None)
}

fn is_content_markdown(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".md") && !name.ends_with("_layout.md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path, text: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_render_args() {
        let extractor = CommandExtractor::mineru();
        let args = extractor.render_args(Path::new("/in/doc.pdf"), Path::new("/tmp/out"));
        assert_eq!(args, vec!["-p", "/in/doc.pdf", "-o", "/tmp/out"]);
    }

    #[test]
    fn test_placeholder_inside_argument() {
        let extractor = CommandExtractor::new("tool", vec!["--out={output}/md".to_string()]);
        let args = extractor.render_args(Path::new("a.pdf"), Path::new("/o"));
        assert_eq!(args, vec!["--out=/o/md"]);
    }

    #[test]
    fn test_find_markdown_skips_layout_files() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("doc/auto/doc_layout.md"), "layout");
        touch(&dir.path().join("doc/auto/doc.md"), "content");
        touch(&dir.path().join("doc/auto/doc.json"), "{}");
        let found = find_markdown(dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "doc.md");
    }

    #[test]
    fn test_find_markdown_none() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("only_layout.md"), "layout");
        assert_eq!(find_markdown(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_missing_program() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        touch(&input, "%PDF");
        let extractor = CommandExtractor::new("no-such-engine-for-patents", vec![]);
        let err = extractor.extract(&input).unwrap_err();
        assert!(
            matches!(err, ExtractionError::EngineUnavailable(ref name) if name == "no-such-engine-for-patents")
        );
    }

    #[test]
    fn test_missing_input() {
        let extractor = CommandExtractor::mineru();
        let err = extractor.extract(Path::new("/nope/doc.pdf")).unwrap_err();
        assert!(matches!(err, ExtractionError::NotFound(_)));
    }

    #[cfg(unix)]
    mod with_shell {
        use super::*;

        fn shell(script: &str) -> CommandExtractor {
            CommandExtractor::new("sh", vec!["-c".to_string(), script.to_string()])
        }

        fn input() -> (tempfile::TempDir, PathBuf) {
            let dir = tempdir().unwrap();
            let input = dir.path().join("doc.pdf");
            touch(&input, "%PDF");
            (dir, input)
        }

        #[test]
        fn test_collects_markdown_output() {
            let (_dir, input) = input();
            let extractor = shell(
                "mkdir -p {output}/doc/auto && printf 'layout' > {output}/doc/auto/doc_layout.md && printf 'Claims\\n1. X.' > {output}/doc/auto/doc.md",
            );
            assert_eq!(extractor.extract(&input).unwrap(), "Claims\n1. X.");
        }

        #[test]
        fn test_nonzero_exit_reports_stderr() {
            let (_dir, input) = input();
            let err = shell("echo 'cannot open page' >&2; exit 3")
                .extract(&input)
                .unwrap_err();
            match err {
                ExtractionError::EngineFailed { engine, message } => {
                    assert_eq!(engine, "sh");
                    assert_eq!(message, "cannot open page");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_no_output() {
            let (_dir, input) = input();
            let err = shell("true").extract(&input).unwrap_err();
            assert!(matches!(err, ExtractionError::NoOutput(_)));
        }
    }
}
