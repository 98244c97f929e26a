//! # excelstream-xlsx
//!
//! Write xlsx spreadsheets row by row without holding them in memory.
//!
//! ## Features
//!
//! - **Streaming Write**: rows go straight into the compressed archive, memory
//!   stays flat regardless of row count
//! - **Typed Cells**: integers, floats, booleans, text, bytes, timestamps and
//!   hyperlinks, each encoded the way spreadsheet applications expect
//! - **Number Formats**: attach format codes such as `"0.00"` or
//!   `"mm-dd-yy hh:mm"`; each distinct code is declared once
//! - **Any Sink**: write to a file or to any `Write + Seek` such as `Cursor<Vec<u8>>`
//! - **Fail Once**: the first error is kept and returned by every later call
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use excelstream_xlsx::types::{CellValue, Hyperlink, DEFAULT_DATETIME_FORMAT};
//! use excelstream_xlsx::writer::ExcelWriter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = ExcelWriter::create("output.xlsx")?;
//!
//! writer.write_row(["Name", "Score", "Profile"])?;
//! let score = writer.format("0.00", 92.5);
//! writer.write_row(vec![
//!     CellValue::from("Alice"),
//!     score,
//!     Hyperlink::new("https://example.com/alice", "alice", "Open profile").into(),
//! ])?;
//! writer.write_sheet("Scores")?;
//!
//! let stamp = writer.format(DEFAULT_DATETIME_FORMAT, chrono::Local::now());
//! writer.write_row(vec![CellValue::from("Generated"), stamp])?;
//! writer.write_sheet("About")?;
//!
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod date;
pub mod error;
pub mod fast_writer;
pub mod types;
pub mod writer;

pub use cell::{cell_reference, column_name, Cell, CellContent, CellType};
pub use error::{ExcelError, Result};
pub use types::{CellValue, Hyperlink, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};
pub use writer::{ExcelWriter, ExcelWriterBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_through_reexports() {
        let mut writer = ExcelWriter::new(Cursor::new(Vec::new())).unwrap();
        let cell = Cell::new(CellType::Number, CellContent::Value("7".to_string()));
        writer
            .write_row(vec![
                CellValue::from(column_name(2)),
                CellValue::from(cell_reference(2, 0)),
                Hyperlink::new("http://example.com", "x", "").into(),
                cell.into(),
            ])
            .unwrap();
        writer.write_sheet("only").unwrap();
        writer.close().unwrap();

        assert_eq!(writer.sheet_count(), 1);
        assert!(writer.error().is_none());
        let bytes = writer.into_inner().unwrap().into_inner();
        assert!(bytes.starts_with(b"PK"));

        let err: Result<()> = Err(ExcelError::UnsupportedType("formula".to_string()));
        assert!(err.is_err());
        assert_eq!(DEFAULT_DATE_FORMAT, "mm-dd-yy");
        assert_eq!(DEFAULT_DATETIME_FORMAT, "mm-dd-yy hh:mm");
        let _ = ExcelWriterBuilder::new();
    }
}
