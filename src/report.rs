use std::io::Write;
use std::path::PathBuf;

use similar::{ChangeTag, TextDiff};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Status of formatting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// File was already formatted correctly.
    Unchanged,
    /// File was reformatted (or would be, in check mode).
    Changed,
    /// An error occurred while processing the file.
    Error,
}

/// Result of formatting a single file.
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub status: FileStatus,
    pub error: Option<String>,
    /// Original and formatted text, kept when a diff was requested.
    pub diff: Option<(String, String)>,
}

impl FileResult {
    pub fn unchanged(path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Unchanged,
            error: None,
            diff: None,
        }
    }

    pub fn changed(path: PathBuf, diff: Option<(String, String)>) -> Self {
        Self {
            path,
            status: FileStatus::Changed,
            error: None,
            diff,
        }
    }

    pub fn error(path: PathBuf, error: String) -> Self {
        Self {
            path,
            status: FileStatus::Error,
            error: Some(error),
            diff: None,
        }
    }
}

/// Per-status file counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub unchanged: usize,
    pub changed: usize,
    pub errors: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.unchanged + self.changed + self.errors
    }
}

/// Outcome of a run over many files.
#[derive(Debug, Default)]
pub struct Report {
    pub results: Vec<FileResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: FileResult) {
        self.results.push(result);
    }

    pub fn tally(&self) -> Tally {
        self.results
            .iter()
            .fold(Tally::default(), |mut tally, result| {
                match result.status {
                    FileStatus::Unchanged => tally.unchanged += 1,
                    FileStatus::Changed => tally.changed += 1,
                    FileStatus::Error => tally.errors += 1,
                }
                tally
            })
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| r.status == FileStatus::Error)
    }

    pub fn has_changes(&self) -> bool {
        self.results.iter().any(|r| r.status == FileStatus::Changed)
    }

    /// One-line summary, e.g. `3 file(s) processed, 1 reformatted, 2 unchanged`.
    pub fn summary(&self) -> String {
        let tally = self.tally();
        let mut summary = format!("{} file(s) processed", tally.total());
        for (count, label) in [
            (tally.changed, "reformatted"),
            (tally.unchanged, "unchanged"),
            (tally.errors, "error(s)"),
        ] {
            if count > 0 {
                summary.push_str(&format!(", {count} {label}"));
            }
        }
        summary
    }

    /// Print `error: <path>: <message>` for every failed file.
    pub fn print_errors(&self) {
        let failures = self
            .results
            .iter()
            .filter_map(|r| r.error.as_deref().map(|e| (&r.path, e)));
        for (path, error) in failures {
            eprintln!("error: {}: {}", path.display(), error);
        }
    }

    /// Print a line diff for every changed file that kept one, to stderr.
    pub fn print_diffs(&self, color: ColorChoice) -> std::io::Result<()> {
        let mut stderr = StandardStream::stderr(color);
        for result in &self.results {
            if let Some((original, formatted)) = &result.diff {
                write_diff(&mut stderr, &result.path, original, formatted)?;
            }
        }
        Ok(())
    }
}

/// Write a line diff between original and formatted content.
pub fn write_diff(
    out: &mut impl WriteColor,
    path: &std::path::Path,
    original: &str,
    formatted: &str,
) -> std::io::Result<()> {
    writeln!(out, "--- {}", path.display())?;
    writeln!(out, "+++ {}", path.display())?;

    let diff = TextDiff::from_lines(original, formatted);
    for change in diff.iter_all_changes() {
        let (sign, color) = match change.tag() {
            ChangeTag::Delete => ("-", Some(Color::Red)),
            ChangeTag::Insert => ("+", Some(Color::Green)),
            ChangeTag::Equal => (" ", None),
        };
        out.set_color(ColorSpec::new().set_fg(color))?;
        write!(out, "{}{}", sign, change)?;
        if change.missing_newline() {
            writeln!(out)?;
        }
        out.reset()?;
    }
    Ok(())
}
