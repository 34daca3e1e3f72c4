//! Error types for water point data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading raw exports and dictionaries.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// CSV file has a header but no data rows.
    #[error("CSV file has no data rows: {path}")]
    NoDataRows { path: PathBuf },

    // === Schema Errors ===
    /// Declared schema columns absent from the header.
    #[error("missing required columns in {path}: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    // === Dictionary Errors ===
    /// Dictionary file has unexpected format.
    #[error("unexpected dictionary format in {path}: {reason}")]
    DictionaryFormat { path: PathBuf, reason: String },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }

    pub(crate) fn from_csv(path: &std::path::Path, error: csv::Error) -> Self {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(io) => Self::from_io(path, io),
            _ => IngestError::CsvParse {
                path: path.to_path_buf(),
                message,
            },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
