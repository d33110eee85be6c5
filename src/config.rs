use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::SqlclauseError;
use crate::mode::Mode;

const PROJECT_CONFIG: &str = "sqlclause.toml";
const PYPROJECT: &str = "pyproject.toml";
const MAX_INDENT_WIDTH: usize = 16;

/// The keys a config file may set. Anything else is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    indent_width: Option<usize>,
    exclude: Option<Vec<String>>,
}

impl FileConfig {
    fn apply(self, mode: &mut Mode) -> Result<(), SqlclauseError> {
        if let Some(width) = self.indent_width {
            if !(1..=MAX_INDENT_WIDTH).contains(&width) {
                return Err(SqlclauseError::Config(format!(
                    "indent_width must be between 1 and {MAX_INDENT_WIDTH}, got {width}"
                )));
            }
            mode.indent_width = width;
        }
        if let Some(exclude) = self.exclude {
            mode.exclude = exclude;
        }
        Ok(())
    }
}

/// Load sqlclause configuration.
///
/// An explicit `config_path` must exist. Otherwise the inputs' directories and
/// their ancestors are searched for `pyproject.toml` (`[tool.sqlclause]`) or
/// `sqlclause.toml`, falling back to the user config directory.
pub fn load_config(files: &[PathBuf], config_path: Option<&Path>) -> Result<Mode, SqlclauseError> {
    let config_file = match config_path {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(path) => {
            return Err(SqlclauseError::Config(format!(
                "Config file not found: {}",
                path.display()
            )))
        }
        None => find_config_file(files).or_else(user_config_file),
    };

    let mut mode = Mode::default();
    if let Some(path) = config_file {
        debug!(path = %path.display(), "loading config");
        read_config(&path)?.apply(&mut mode)?;
    }
    Ok(mode)
}

/// The nearest config file above any of the inputs, most specific directory first.
fn find_config_file(files: &[PathBuf]) -> Option<PathBuf> {
    search_dirs(files)
        .into_iter()
        .flat_map(|dir| [dir.join(PYPROJECT), dir.join(PROJECT_CONFIG)])
        .find(|candidate| candidate.exists())
}

/// `<config dir>/sqlclause/sqlclause.toml`, if present.
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("sqlclause").join(PROJECT_CONFIG);
    path.exists().then_some(path)
}

/// Each input's directory followed by its ancestors, without repeats.
fn search_dirs(files: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for file in files {
        let start = if file.is_dir() {
            file.as_path()
        } else {
            match file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            }
        };
        for dir in start.ancestors() {
            if !dirs.iter().any(|seen| seen == dir) {
                dirs.push(dir.to_path_buf());
            }
        }
    }
    dirs
}

/// Parse the sqlclause settings out of a config file.
///
/// `pyproject.toml` keeps them under `[tool.sqlclause]`; `sqlclause.toml` may
/// use either that table or top-level keys. A pyproject without the table
/// contributes nothing.
fn read_config(path: &Path) -> Result<FileConfig, SqlclauseError> {
    let content = std::fs::read_to_string(path)?;
    let mut parsed: toml::Table = content.parse().map_err(|e| {
        SqlclauseError::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let section = match parsed.remove("tool") {
        Some(toml::Value::Table(mut tool)) => tool.remove("sqlclause"),
        _ => None,
    };
    let is_project_file = path.file_name().is_some_and(|n| n == PROJECT_CONFIG);
    let table = match section {
        Some(section) => section,
        None if is_project_file => toml::Value::Table(parsed),
        None => return Ok(FileConfig::default()),
    };

    table
        .try_into()
        .map_err(|e| SqlclauseError::Config(format!("{}: {}", path.display(), e)))
}
