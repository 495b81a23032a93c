use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Required column '{field}' not found (looked for: {candidates})")]
    MissingColumn { field: String, candidates: String },

    #[error("Malformed row at line {line}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Text encoding error: {0}")]
    Encoding(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("No usable records after cleaning {total_rows} input rows")]
    NoRecords { total_rows: usize },

    #[error("Chart rendering error: {0}")]
    Chart(String),
}
