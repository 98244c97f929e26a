//! Error types for the streaming xlsx writer

use std::fmt::Display;
use thiserror::Error;

/// Result type alias for all writer operations
pub type Result<T> = std::result::Result<T, ExcelError>;

/// Main error type for all Excel operations
///
/// Errors are `Clone` so a failed document can hand back the exact error that
/// put it into its terminal state on every later call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExcelError {
    /// A cell value could not be encoded
    #[error("Unsupported cell type: {0}")]
    UnsupportedType(String),

    /// Error occurred while writing a row
    #[error("Failed to write row {row} to sheet {sheet}: {source}")]
    WriteRowError {
        row: u32,
        sheet: u32,
        #[source]
        source: Box<ExcelError>,
    },

    /// The output sink rejected a write, or the workbook is already closed
    #[error("Failed to write Excel file: {0}")]
    WriteError(String),

    /// A package part could not be created
    #[error("Missing package part: {0}")]
    MissingPart(String),
}

impl ExcelError {
    /// The innermost error, with row context stripped
    pub fn root_cause(&self) -> &ExcelError {
        match self {
            ExcelError::WriteRowError { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<std::io::Error> for ExcelError {
    fn from(err: std::io::Error) -> Self {
        ExcelError::WriteError(err.to_string())
    }
}

/// Map an archive stream failure into a write error
pub(crate) fn stream_error<E: Display>(err: E) -> ExcelError {
    ExcelError::WriteError(err.to_string())
}

/// Map a failure to start an archive entry into a missing part error
pub(crate) fn part_error<E: Display>(part: &str, err: E) -> ExcelError {
    ExcelError::MissingPart(format!("{}: {}", part, err))
}
