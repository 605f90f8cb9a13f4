// ==========================================
// EA Portal Data Core - loader error types
// ==========================================
// thiserror derive; structural input problems only. Malformed
// business data never lands here - it degrades inside the
// transformers and shows up in validation reports.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("sheet has no header row: {0}")]
    EmptySheet(String),

    #[error("Excel parse failed: {0}")]
    ExcelParse(String),

    #[error("CSV parse failed: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<calamine::XlsxError> for LoadError {
    fn from(err: calamine::XlsxError) -> Self {
        LoadError::ExcelParse(err.to_string())
    }
}

/// Result type alias for the loader layer.
pub type LoadResult<T> = Result<T, LoadError>;
