use std::path::PathBuf;

use thiserror::Error;

/// Everything that can keep the launch table from loading.
///
/// Any of these at startup means the dashboard has no data to show, so the
/// binary treats them all as fatal.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("launch data unavailable at {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),
    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, DataError>;
