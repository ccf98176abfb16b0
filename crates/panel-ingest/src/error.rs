//! Error types for panel table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a panel table from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV file {path} is {size} bytes, above the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Only UTF-8 input is read.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The file parsed but holds no observations.
    #[error("CSV file has no data rows: {path}")]
    EmptyDataFrame { path: PathBuf },

    #[error("CSV file {path} has a blank column name")]
    EmptyColumnName { path: PathBuf },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/panel.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /data/panel.csv");
    }

    #[test]
    fn polars_errors_convert() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("unit".into());
        let err: IngestError = polars_err.into();
        assert!(matches!(err, IngestError::DataFrame { .. }));
    }
}
