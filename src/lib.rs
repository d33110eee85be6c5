//! sqlclause reformats a single SQL statement into a canonical, indented,
//! clause-per-block layout.
//!
//! ```
//! let sql = "select a, b from t where x = 1 and y = 2 order by a";
//! let formatted = sqlclause::format(sql).unwrap();
//! assert!(formatted.starts_with("SELECT\n    a,\n    b\nFROM t\nWHERE\n"));
//! assert!(formatted.ends_with("ORDER BY\n    a;"));
//! ```

pub mod api;
pub mod clause;
pub mod clauses;
pub mod config;
pub mod constructs;
pub mod error;
pub mod formatter;
pub mod line;
pub mod mode;
pub mod normalizer;
pub mod query;
pub mod report;
pub mod splitter;
pub mod string_utils;
pub mod token;

// Re-export the main public API
pub use api::{format_string, get_matching_paths, run};
pub use config::load_config;
pub use error::{FormatError, SqlclauseError};
pub use formatter::{format, format_query, QueryFormatter};
pub use mode::Mode;
