use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::SqlclauseError;
use crate::formatter::QueryFormatter;
use crate::mode::Mode;
use crate::query::STATEMENT_TERMINATOR;
use crate::report::{FileResult, Report};

/// Format a SQL statement according to the given mode.
///
/// The result ends with the statement terminator and a newline, ready to be
/// written back to a file. Unless disabled, the output is checked to contain
/// the same tokens as the input.
pub fn format_string(source: &str, mode: &Mode) -> Result<String, SqlclauseError> {
    let formatter = QueryFormatter::new(mode.indent_width);
    let mut result = formatter.format(source)?;
    result.push('\n');

    if mode.should_safety_check() {
        safety_check(source, &result)?;
    }

    Ok(result)
}

/// Run the formatter on a collection of files.
pub fn run(files: &[PathBuf], mode: &Mode) -> Report {
    let matching_paths = get_matching_paths(files, mode);
    debug!(files = matching_paths.len(), "formatting files");
    let mut report = Report::new();

    let progress = if mode.show_progress() && matching_paths.len() > 1 {
        let bar = ProgressBar::new(matching_paths.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {wide_msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let format_one = |path: &PathBuf| {
        let result = format_file(path, mode);
        progress.inc(1);
        result
    };

    let pool = if mode.single_process || matching_paths.len() <= 1 {
        None
    } else {
        // 0 lets rayon pick: all available cores.
        rayon::ThreadPoolBuilder::new()
            .num_threads(mode.threads)
            .build()
            .map_err(|e| warn!("falling back to a single thread: {}", e))
            .ok()
    };

    let results: Vec<FileResult> = match pool {
        Some(pool) => pool.install(|| matching_paths.par_iter().map(format_one).collect()),
        None => matching_paths.iter().map(format_one).collect(),
    };
    progress.finish_and_clear();

    for result in results {
        report.add(result);
    }
    report
}

/// Format a single file.
fn format_file(path: &Path, mode: &Mode) -> FileResult {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return FileResult::error(path.to_path_buf(), format!("Read error: {}", e)),
    };

    let formatted = match format_string(&source, mode) {
        Ok(f) => f,
        Err(e) => return FileResult::error(path.to_path_buf(), e.to_string()),
    };

    if source == formatted {
        return FileResult::unchanged(path.to_path_buf());
    }

    if mode.check || mode.diff {
        let diff = mode.diff.then(|| (source, formatted));
        return FileResult::changed(path.to_path_buf(), diff);
    }

    match std::fs::write(path, &formatted) {
        Ok(_) => FileResult::changed(path.to_path_buf(), None),
        Err(e) => FileResult::error(path.to_path_buf(), format!("Write error: {}", e)),
    }
}

/// Get all SQL file paths that match the given inputs.
pub fn get_matching_paths(paths: &[PathBuf], mode: &Mode) -> Vec<PathBuf> {
    let extensions = mode.sql_extensions();
    let exclude: Vec<glob::Pattern> = mode
        .exclude
        .iter()
        .filter_map(|pattern| match glob::Pattern::new(pattern) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(pattern = pattern.as_str(), "ignoring invalid exclude pattern: {}", e);
                None
            }
        })
        .collect();
    let mut result = HashSet::new();

    for path in paths {
        if path.is_file() {
            if is_sql_file(path, extensions) {
                result.insert(path.clone());
            }
        } else if path.is_dir() {
            collect_sql_files(path, extensions, &exclude, &mut result);
        }
    }

    let mut sorted: Vec<PathBuf> = result.into_iter().collect();
    sorted.sort();
    sorted
}

/// Check if a file has a SQL extension.
fn is_sql_file(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Recursively collect SQL files from a directory.
fn collect_sql_files(
    dir: &Path,
    extensions: &[&str],
    exclude: &[glob::Pattern],
    result: &mut HashSet<PathBuf>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(dir = %dir.display(), "cannot read directory: {}", e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // Skip hidden entries and excluded patterns
        if name.starts_with('.') || exclude.iter().any(|p| p.matches(&name)) {
            continue;
        }

        if path.is_dir() {
            collect_sql_files(&path, extensions, exclude, result);
        } else if is_sql_file(&path, extensions) {
            result.insert(path);
        }
    }
}

/// Verify the formatted output carries the same tokens as the original.
///
/// Tokens are whitespace-separated words further split around parentheses
/// and commas, compared case-insensitively, ignoring one trailing `;`.
fn safety_check(original: &str, formatted: &str) -> Result<(), SqlclauseError> {
    let tokens1 = preserved_tokens(original);
    let tokens2 = preserved_tokens(formatted);

    if let Some(i) = tokens1.iter().zip(&tokens2).position(|(a, b)| a != b) {
        return Err(SqlclauseError::Equivalence(format!(
            "Token mismatch at position {}: original '{}', formatted '{}'",
            i, tokens1[i], tokens2[i]
        )));
    }
    if tokens1.len() != tokens2.len() {
        return Err(SqlclauseError::Equivalence(format!(
            "Token count mismatch: original has {} tokens, formatted has {}",
            tokens1.len(),
            tokens2.len()
        )));
    }
    Ok(())
}

fn preserved_tokens(text: &str) -> Vec<String> {
    let trimmed = text.trim_end();
    let statement = trimmed
        .strip_suffix(STATEMENT_TERMINATOR)
        .unwrap_or(trimmed);

    let mut tokens = Vec::new();
    for word in statement.split_whitespace() {
        let mut start = 0;
        for (i, c) in word.char_indices() {
            if matches!(c, '(' | ')' | ',') {
                if i > start {
                    tokens.push(word[start..i].to_ascii_uppercase());
                }
                tokens.push(c.to_string());
                start = i + 1;
            }
        }
        if start < word.len() {
            tokens.push(word[start..].to_ascii_uppercase());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_string_ends_with_newline() {
        let result = format_string("select a from t", &Mode::default()).unwrap();
        assert_eq!(result, "SELECT\n    a\nFROM t;\n");
    }

    #[test]
    fn test_format_string_reports_engine_errors() {
        let err = format_string("SELECT (a FROM t", &Mode::default()).unwrap_err();
        assert!(matches!(err, SqlclauseError::Format(_)));
    }

    #[test]
    fn test_preserved_tokens_splits_punctuation() {
        assert_eq!(
            preserved_tokens("a IN (SELECT x,y FROM u);"),
            ["A", "IN", "(", "SELECT", "X", ",", "Y", "FROM", "U", ")"]
        );
    }

    #[test]
    fn test_safety_check_accepts_layout_changes() {
        let original = "select a,b from t where x in (1,2)";
        let formatted = "SELECT\n    a,\n    b\nFROM t\nWHERE\n    x IN (\n        1,\n        2\n    );\n";
        assert!(safety_check(original, formatted).is_ok());
    }

    #[test]
    fn test_safety_check_detects_lost_tokens() {
        let err = safety_check("SELECT a, b FROM t", "SELECT\n    a\nFROM t;").unwrap_err();
        assert!(matches!(err, SqlclauseError::Equivalence(_)));
    }

    #[test]
    fn test_is_sql_file() {
        let extensions = &["sql", "ddl"];
        assert!(is_sql_file(Path::new("test.sql"), extensions));
        assert!(is_sql_file(Path::new("TEST.SQL"), extensions));
        assert!(!is_sql_file(Path::new("test.py"), extensions));
        assert!(!is_sql_file(Path::new("sql"), extensions));
    }
}
