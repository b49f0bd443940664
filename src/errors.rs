//! Submodule defining the errors used across the crate.

use alloc::string::String;
#[cfg(feature = "std")]
use std::path::PathBuf;

use crate::schema::SchemaError;
use crate::sql::ParseError;

/// Errors that can occur while loading, parsing, and exporting a dump.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A statement of the dump could not be decomposed into rows.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A schema registry could not be built.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The dump file does not exist.
    #[cfg(feature = "std")]
    #[error("Dump file not found: {}", .path.display())]
    DumpNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
    /// Reading the dump or writing an export failed.
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The CSV writer failed.
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// JSON encoding or decoding failed.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A row carries a column that the export header does not list.
    #[error("Row of table '{table}' has column '{column}' which is not part of the export header")]
    UnexpectedColumn {
        /// Table being exported.
        table: String,
        /// The column missing from the header.
        column: String,
    },
}
