//! CSV reading for long-format panel tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info_span};

use crate::error::{IngestError, Result};

/// Maximum file size accepted by [`read_panel_csv`] (500 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Rows sampled for dtype inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Read a long-format panel CSV into a `DataFrame`.
///
/// The first row holds column names. Column dtypes are inferred, and
/// ISO-8601 date columns are parsed into polars `Date` so they can serve as
/// period labels.
pub fn read_panel_csv(path: &Path) -> Result<DataFrame> {
    let span = info_span!("read_panel_csv", path = %path.display());
    let _guard = span.enter();

    check_file_size(path)?;
    validate_encoding(path)?;

    let parse_error = |err: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    let table = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .map_parse_options(|options| options.with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    validate_table_shape(&table, path)?;
    debug!(
        rows = table.height(),
        columns = table.width(),
        "loaded panel table"
    );
    Ok(table)
}

pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Reject files that do not exist or exceed `max_size` bytes.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|err| open_error(path, err))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reject UTF-16 input by its byte-order mark. A UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|err| open_error(path, err))?;
    let mut prefix = [0u8; 2];
    let read = file
        .read(&mut prefix)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    if read < 2 {
        return Ok(());
    }
    let encoding = match prefix {
        [0xFF, 0xFE] => "UTF-16 LE",
        [0xFE, 0xFF] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

/// A panel table needs at least one observation and named columns.
pub fn validate_table_shape(table: &DataFrame, path: &Path) -> Result<()> {
    if table.height() == 0 {
        return Err(IngestError::EmptyDataFrame {
            path: path.to_path_buf(),
        });
    }
    if table
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn size_limit_is_enforced() {
        let file = temp_file(b"unit,time,y\na,1,1.0\n");
        let err = check_file_size_with_limit(file.path(), 4).unwrap_err();
        assert!(matches!(err, IngestError::FileTooLarge { max_size: 4, .. }));
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
    }

    #[test]
    fn utf16_bom_is_rejected() {
        let file = temp_file(&[0xFF, 0xFE, b'u', 0]);
        let err = validate_encoding(file.path()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }

    #[test]
    fn utf8_and_short_files_pass_encoding_check() {
        let bom = temp_file(&[0xEF, 0xBB, 0xBF, b'u']);
        assert!(validate_encoding(bom.path()).is_ok());
        let short = temp_file(b"u");
        assert!(validate_encoding(short.path()).is_ok());
    }
}
