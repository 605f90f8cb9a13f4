// ==========================================
// EA Portal Data Core - spreadsheet file parsers
// ==========================================
// Support: Excel (.xlsx/.xls) / CSV (.csv)
// Output: Vec<RawRow> - header text -> cell value, blank rows skipped.
// The transformation core consumes only this contract and is
// loader-agnostic.
// ==========================================

use crate::dates::{excel_serial_to_date, EpochSystem};
use crate::domain::types::{CellValue, RawRow};
use crate::loader::error::{LoadError, LoadResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::Datelike;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// A bulk row source: one sheet in, untyped rows out.
pub trait RowSource {
    fn load_rows(&self, path: &Path) -> LoadResult<Vec<RawRow>>;
}

// ==========================================
// CSV loader
// ==========================================
pub struct CsvLoader;

/// Candidate delimiters tried against the header line, most columns wins.
const DELIMITER_GUESSES: &[u8] = b",;\t";

impl RowSource for CsvLoader {
    fn load_rows(&self, path: &Path) -> LoadResult<Vec<RawRow>> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let delimiter = guess_delimiter(&content);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true) // tolerate ragged row lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(LoadError::EmptySheet(path.display().to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), coerce_text(value));
                }
            }
            if row.values().all(CellValue::is_blank) {
                continue;
            }
            rows.push(row);
        }

        info!(path = %path.display(), rows = rows.len(), "csv sheet loaded");
        Ok(rows)
    }
}

fn guess_delimiter(content: &str) -> u8 {
    let header_line = content.lines().next().unwrap_or("");
    DELIMITER_GUESSES
        .iter()
        .copied()
        .max_by_key(|d| header_line.matches(*d as char).count())
        .unwrap_or(b',')
}

/// Lenient type coercion: numeric-looking text becomes a Number cell
/// so Excel-serial dates survive a CSV round trip.
fn coerce_text(value: &str) -> CellValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(trimmed.to_string())
}

// ==========================================
// Excel loader
// ==========================================
pub struct ExcelLoader;

impl RowSource for ExcelLoader {
    fn load_rows(&self, path: &Path) -> LoadResult<Vec<RawRow>> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| LoadError::EmptySheet(path.display().to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| LoadError::ExcelParse(e.to_string()))?;

        let mut sheet_rows = range.rows();
        // First non-blank convention: calamine ranges start at the
        // first used cell, so the first yielded row is the header.
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| LoadError::EmptySheet(path.display().to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let mut row = HashMap::new();
            for (col_idx, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                // Blank default for cells the row does not reach.
                let value = data_row.get(col_idx).map(convert_cell).unwrap_or(CellValue::Empty);
                row.insert(header.clone(), value);
            }
            if row.values().all(CellValue::is_blank) {
                continue;
            }
            rows.push(row);
        }

        info!(path = %path.display(), sheet = %sheet_name, rows = rows.len(), "excel sheet loaded");
        Ok(rows)
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => {
            // Date-formatted cell: carry the calendar date, not the serial.
            match excel_serial_to_date(dt.as_f64(), EpochSystem::Date1900) {
                Some(date) => CellValue::Ymd {
                    y: date.year(),
                    m: date.month(),
                    d: date.day(),
                },
                None => CellValue::Number(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

// ==========================================
// Extension-dispatching loader
// ==========================================
pub struct SheetLoader;

impl SheetLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Vec<RawRow>> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvLoader.load_rows(path),
            "xlsx" | "xls" => ExcelLoader.load_rows(path),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_csv_loader_basic() {
        let file = csv_file(&["id,name,count", "R1,Portal,3", "R2,Registry,5"]);
        let rows = CsvLoader.load_rows(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some(&CellValue::from("R1")));
        assert_eq!(rows[0].get("count"), Some(&CellValue::Number(3.0)));
    }

    #[test]
    fn test_csv_loader_skips_blank_rows() {
        let file = csv_file(&["id,name", "R1,Portal", ",", "R2,Registry"]);
        let rows = CsvLoader.load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_csv_loader_guesses_semicolon_delimiter() {
        let file = csv_file(&["id;name", "R1;Portal"]);
        let rows = CsvLoader.load_rows(file.path()).unwrap();
        assert_eq!(rows[0].get("name"), Some(&CellValue::from("Portal")));
    }

    #[test]
    fn test_csv_loader_file_not_found() {
        let result = CsvLoader.load_rows(Path::new("no_such_file.csv"));
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_sheet_loader_rejects_unknown_extension() {
        let result = SheetLoader::load("data.parquet");
        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_convert_cell_datetime_becomes_calendar_date() {
        // Date-formatted cells reach the transformers as Ymd, never as
        // the raw serial; the fraction is time-of-day and drops out.
        let cell = Data::DateTime(ExcelDateTime::new(
            45292.75,
            ExcelDateTimeType::DateTime,
            false,
        ));
        assert_eq!(
            convert_cell(&cell),
            CellValue::Ymd { y: 2024, m: 1, d: 1 }
        );
    }

    #[test]
    fn test_convert_cell_empty_and_error_are_blank() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::Error(CellErrorType::Div0)),
            CellValue::Empty
        );
        assert_eq!(
            convert_cell(&Data::String("  ".to_string())),
            CellValue::Empty
        );
    }

    #[test]
    fn test_convert_cell_numbers_and_text() {
        assert_eq!(convert_cell(&Data::Int(42)), CellValue::Number(42.0));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(
            convert_cell(&Data::String("  Postgres ".to_string())),
            CellValue::from("Postgres")
        );
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::from("true"));
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text("45292"), CellValue::Number(45292.0));
        assert_eq!(coerce_text("01/01/2024"), CellValue::from("01/01/2024"));
        assert_eq!(coerce_text("  "), CellValue::Empty);
    }
}
