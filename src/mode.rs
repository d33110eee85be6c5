use serde::Deserialize;
use termcolor::ColorChoice;

use crate::formatter::DEFAULT_INDENT_WIDTH;

/// Formatting and run options for one sqlclause invocation.
///
/// Deserializes from a config table; absent keys keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Mode {
    /// Spaces per indent level.
    pub indent_width: usize,
    /// Report changes without writing files.
    pub check: bool,
    /// Keep original and formatted text of changed files for a diff.
    pub diff: bool,
    /// Skip the token-preservation safety check.
    pub fast: bool,
    /// Glob patterns matched against file and directory names.
    pub exclude: Vec<String>,
    pub verbose: bool,
    pub quiet: bool,
    pub no_progressbar: bool,
    pub no_color: bool,
    pub force_color: bool,
    /// Worker threads; 0 lets the pool use every core.
    pub threads: usize,
    pub single_process: bool,
}

impl Mode {
    /// Color choice for diff output. `force_color` wins over `no_color`.
    pub fn color_choice(&self) -> ColorChoice {
        if self.force_color {
            return ColorChoice::Always;
        }
        if self.no_color || std::env::var_os("NO_COLOR").is_some() {
            return ColorChoice::Never;
        }
        ColorChoice::Auto
    }

    /// Whether the safety check should be performed.
    pub fn should_safety_check(&self) -> bool {
        !self.fast && !self.check && !self.diff
    }

    /// Whether to draw a progress bar for multi-file runs.
    pub fn show_progress(&self) -> bool {
        !self.no_progressbar && !self.quiet
    }

    /// SQL file extensions to process.
    pub fn sql_extensions(&self) -> &[&str] {
        &["sql", "ddl", "dml"]
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            check: false,
            diff: false,
            fast: false,
            exclude: Vec::new(),
            verbose: false,
            quiet: false,
            no_progressbar: false,
            no_color: false,
            force_color: false,
            threads: 0,
            single_process: false,
        }
    }
}
