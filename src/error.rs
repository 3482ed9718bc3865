// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run.
///
/// Setup (`BrowserLaunch`), navigation (`Browser`), parse and merge errors are
/// fatal. Per-file read errors during merge/concatenation are caught by the
/// caller, logged, and the file skipped.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("browser failed to start: {0}")]
    BrowserLaunch(String),

    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("error parsing {context}: {detail}")]
    Parse { context: String, detail: String },

    #[error("no {ext} files found in {}", dir.display())]
    NoInputFiles { dir: PathBuf, ext: String },

    #[error("every {ext} file in {} is empty or unreadable", dir.display())]
    NothingToMerge { dir: PathBuf, ext: String },

    #[error("join key `{column}` missing from {table}")]
    MissingKeyColumn { column: String, table: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] ::csv::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn parse(context: impl Into<String>, detail: impl Into<String>) -> Self {
        ScrapeError::Parse { context: context.into(), detail: detail.into() }
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
