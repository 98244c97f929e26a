//! Streaming xlsx document
//!
//! Rows are written straight into the open worksheet of the archive as
//! `write_row` is called; nothing but style tables and per-sheet hyperlink
//! records is kept in memory.
//!
//! A document fails once: the first error from any operation is kept, and
//! every later call returns that same error without touching the sink.

use crate::error::{stream_error, ExcelError, Result};
use crate::fast_writer::{DocProperties, FastWorkbook, StreamingZipWriter, Stylesheet, Xf};
use crate::types::CellValue;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

/// Deflate level used when none is configured
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Streaming xlsx writer
///
/// # Examples
///
/// ```no_run
/// use excelstream_xlsx::types::CellValue;
/// use excelstream_xlsx::writer::ExcelWriter;
///
/// let mut writer = ExcelWriter::create("output.xlsx")?;
///
/// writer.write_row(["Name", "Age"])?;
/// writer.write_row(vec![CellValue::from("Alice"), CellValue::from(30)])?;
/// writer.write_sheet("People")?;
///
/// writer.close()?;
/// # Ok::<(), excelstream_xlsx::ExcelError>(())
/// ```
pub struct ExcelWriter<W: Write + Seek = File> {
    workbook: Option<FastWorkbook<W>>,
    styles: Stylesheet,
    formats: HashMap<String, u32>,
    error: Option<ExcelError>,
    output: Option<W>,
    closed_sheets: usize,
}

impl ExcelWriter<File> {
    /// Create an xlsx file at `path` with default settings
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        ExcelWriterBuilder::new().create(path)
    }
}

impl<W: Write + Seek> ExcelWriter<W> {
    /// Write an xlsx document into any seekable sink with default settings
    ///
    /// # Examples
    ///
    /// ```
    /// use excelstream_xlsx::writer::ExcelWriter;
    /// use std::io::Cursor;
    ///
    /// let mut writer = ExcelWriter::new(Cursor::new(Vec::new()))?;
    /// writer.write_row(["a", "b"])?;
    /// writer.close()?;
    /// let bytes = writer.into_inner()?.into_inner();
    /// assert!(bytes.starts_with(b"PK"));
    /// # Ok::<(), excelstream_xlsx::ExcelError>(())
    /// ```
    pub fn new(writer: W) -> Result<Self> {
        ExcelWriterBuilder::new().build(writer)
    }

    fn from_zip(zip: StreamingZipWriter<W>, props: &DocProperties) -> Result<Self> {
        Ok(ExcelWriter {
            workbook: Some(FastWorkbook::new(zip, props)?),
            styles: Stylesheet::new(),
            formats: HashMap::new(),
            error: None,
            output: None,
            closed_sheets: 0,
        })
    }

    /// Append a row to the current sheet.
    ///
    /// The first call after `write_sheet` (or after creation) opens a new
    /// sheet. `CellValue::Empty` leaves its column blank.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use excelstream_xlsx::writer::ExcelWriter;
    /// use excelstream_xlsx::types::{CellValue, Hyperlink};
    ///
    /// let mut writer = ExcelWriter::create("output.xlsx")?;
    /// writer.write_row(vec![
    ///     CellValue::from("Total"),
    ///     CellValue::Empty,
    ///     CellValue::from(1234.56),
    ///     Hyperlink::new("https://example.com", "details", "open").into(),
    /// ])?;
    /// writer.close()?;
    /// # Ok::<(), excelstream_xlsx::ExcelError>(())
    /// ```
    pub fn write_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.check()?;
        let result = match self.workbook.as_mut() {
            Some(workbook) => workbook.write_row(values.into_iter().map(Into::into)),
            None => Err(closed()),
        };
        result.map_err(|e| self.fail(e))
    }

    /// Write multiple rows at once
    pub fn write_rows_batch<I, R, V>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Finish the current sheet under `title`.
    ///
    /// Without a preceding `write_row` this adds an empty sheet.
    pub fn write_sheet(&mut self, title: &str) -> Result<()> {
        self.check()?;
        let result = match self.workbook.as_mut() {
            Some(workbook) => workbook.finish_sheet(title),
            None => Err(closed()),
        };
        result.map_err(|e| self.fail(e))
    }

    /// Attach the number format `code` to `value`.
    ///
    /// The cell format for a code is registered once and reused afterwards.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use excelstream_xlsx::writer::ExcelWriter;
    /// use excelstream_xlsx::types::DEFAULT_DATETIME_FORMAT;
    ///
    /// let mut writer = ExcelWriter::create("output.xlsx")?;
    /// let price = writer.format("0.00", 3.1415);
    /// let now = writer.format(DEFAULT_DATETIME_FORMAT, chrono::Local::now());
    /// writer.write_row(vec![price, now])?;
    /// writer.close()?;
    /// # Ok::<(), excelstream_xlsx::ExcelError>(())
    /// ```
    pub fn format(&mut self, code: &str, value: impl Into<CellValue>) -> CellValue {
        let style = match self.formats.get(code) {
            Some(&style) => style,
            None => {
                let num_fmt_id = self.styles.num_fmt_id(code);
                let parent = self.styles.cell_style_xf_id(Xf::default());
                let style = self.styles.cell_xf_id(Xf {
                    num_fmt_id,
                    apply_number_format: true,
                    xf_id: Some(parent),
                    ..Xf::default()
                });
                self.formats.insert(code.to_string(), style);
                style
            }
        };
        value.into().with_style(style)
    }

    /// Finish the last sheet and write the remaining package parts.
    ///
    /// An unnamed open sheet becomes "sheet N"; a document without sheets
    /// gets a single empty one.
    pub fn close(&mut self) -> Result<()> {
        self.check()?;
        let Some(workbook) = self.workbook.take() else {
            return Err(self.fail(closed()));
        };
        let sheets = match workbook.sheet_count() {
            0 => 1,
            n if workbook.has_open_sheet() => n + 1,
            n => n,
        };
        match workbook.close(&self.styles) {
            Ok(output) => {
                self.output = Some(output);
                self.closed_sheets = sheets;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// The error that ended this document, if any
    pub fn error(&self) -> Option<&ExcelError> {
        self.error.as_ref()
    }

    /// Style tables registered so far
    pub fn styles(&self) -> &Stylesheet {
        &self.styles
    }

    /// Number of finished sheets
    pub fn sheet_count(&self) -> usize {
        self.workbook
            .as_ref()
            .map_or(self.closed_sheets, FastWorkbook::sheet_count)
    }

    /// The sink, once the document has been closed successfully
    pub fn into_inner(self) -> Result<W> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.output
            .ok_or_else(|| ExcelError::WriteError("workbook is still open".to_string()))
    }

    fn check(&self) -> Result<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Record `err` as the terminal error
    fn fail(&mut self, err: ExcelError) -> ExcelError {
        log::warn!("xlsx document failed: {}", err);
        self.error = Some(err.clone());
        err
    }
}

fn closed() -> ExcelError {
    ExcelError::WriteError("workbook already closed".to_string())
}

/// Builder for configured writers
///
/// # Examples
///
/// ```no_run
/// use excelstream_xlsx::writer::ExcelWriterBuilder;
///
/// let mut writer = ExcelWriterBuilder::new()
///     .compression_level(9)
///     .creator("reports")
///     .create("output.xlsx")?;
/// writer.write_row([1, 2, 3])?;
/// writer.close()?;
/// # Ok::<(), excelstream_xlsx::ExcelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExcelWriterBuilder {
    compression_level: u32,
    props: DocProperties,
}

impl ExcelWriterBuilder {
    pub fn new() -> Self {
        ExcelWriterBuilder {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            props: DocProperties::default(),
        }
    }

    /// Deflate level for file output, 0 (store) to 9 (best)
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    /// Author recorded in the document properties
    pub fn creator(mut self, creator: &str) -> Self {
        self.props.creator = creator.to_string();
        self
    }

    /// Creation time recorded in the document properties
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.props.created = created;
        self
    }

    /// Create the file at `path` and start the document
    pub fn create<P: AsRef<Path>>(self, path: P) -> Result<ExcelWriter<File>> {
        let zip = StreamingZipWriter::with_compression(path.as_ref(), self.compression_level)
            .map_err(stream_error)?;
        ExcelWriter::from_zip(zip, &self.props)
    }

    /// Start a document in `writer`
    pub fn build<W: Write + Seek>(self, writer: W) -> Result<ExcelWriter<W>> {
        let zip = StreamingZipWriter::from_writer(writer).map_err(stream_error)?;
        ExcelWriter::from_zip(zip, &self.props)
    }
}

impl Default for ExcelWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
