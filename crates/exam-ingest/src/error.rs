use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A problem tied to one row of an imported sheet.
///
/// Rows are counted the way spreadsheets show them: the header is row 1.
/// Issues that concern the whole sheet carry no row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: Option<usize>,
    pub column: Option<String>,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, column: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            column: column.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.row, &self.column) {
            (Some(row), Some(column)) => write!(f, "row {row}, {column}: {}", self.message),
            (Some(row), None) => write!(f, "row {row}: {}", self.message),
            (None, Some(column)) => write!(f, "{column}: {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read CSV")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Every row problem found in the sheet; nothing was imported.
    #[error("{} problem(s) found in the imported sheet", .0.len())]
    Rows(Vec<RowError>),
}

impl ImportError {
    /// Row problems, if the sheet itself was readable.
    pub fn row_errors(&self) -> &[RowError] {
        match self {
            ImportError::Rows(errors) => errors,
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output")]
    Flush(#[source] std::io::Error),
}
