// ==========================================
// EA Portal Data Core - input boundary
// ==========================================
// Bulk spreadsheet loading: file path in, Vec<RawRow> out.
// No persistence; every page view re-derives from a fresh load.
// ==========================================

pub mod error;
pub mod file_parser;

pub use error::{LoadError, LoadResult};
pub use file_parser::{CsvLoader, ExcelLoader, RowSource, SheetLoader};
