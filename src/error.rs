use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the roster core.
///
/// Load and resolution failures are always typed: a missing snapshot, a
/// header mismatch and a zero-row roster must stay distinguishable from
/// legitimate empty results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("no snapshot matching '{prefix}*' in {}", dir.display())]
    NoSnapshot { prefix: String, dir: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("header row is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("row {row}: malformed {column} cell '{value}'")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("roster has no rows")]
    EmptyRoster,

    #[error("failed to draw histogram: {0}")]
    Render(String),
}

/// Result type alias for roster-core operations.
pub type Result<T> = std::result::Result<T, Error>;
