//! Loading of long-format panel tables.
//!
//! Reads a CSV file with one row per (unit, period) observation into a
//! polars `DataFrame`, ready for `panel_transform::build_panel`.
//!
//! ```ignore
//! use std::path::Path;
//! use panel_ingest::read_panel_csv;
//!
//! let table = read_panel_csv(Path::new("data/smoking.csv"))?;
//! ```

mod error;
mod reader;

pub use error::{IngestError, Result};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_panel_csv,
    validate_encoding, validate_table_shape,
};
