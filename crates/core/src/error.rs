//! Error types for fichas.

use fichas_sheet::SheetError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for fichas operations.
pub type FichasResult<T> = Result<T, FichasError>;

/// File-level failures. Any of these aborts the load; no partial dataset is
/// ever returned alongside them.
#[derive(Debug, Error)]
pub enum FichasError {
    /// No workbook matching the marker was found.
    #[error("No workbook containing '{marker}' found in {}", dir.display())]
    SourceNotFound { dir: PathBuf, marker: String },

    /// The workbook exists but could not be parsed.
    #[error("Failed to load workbook {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: SheetError,
    },

    /// Delimited export failed.
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FichasError {
    /// Create a load error for `path`.
    pub fn load(path: impl Into<PathBuf>, source: SheetError) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure means "nothing to show" rather than a broken file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}

/// Why a sheet contributed no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No header row within the scan window.
    HeaderNotFound,
    /// The header has no column for the task description.
    TaskColumnNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HeaderNotFound => write!(f, "header row not found"),
            SkipReason::TaskColumnNotFound => write!(f, "task column not found"),
        }
    }
}

/// A sheet-level anomaly. Collected on the dataset, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Sheet '{sheet}' skipped: {reason}")]
pub struct SheetSkipped {
    pub sheet: String,
    pub reason: SkipReason,
}

impl SheetSkipped {
    pub fn new(sheet: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            sheet: sheet.into(),
            reason,
        }
    }
}
