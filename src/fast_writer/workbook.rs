//! Workbook assembly: sequences every package part into the zip stream

use std::io::{Seek, Write};

use super::package::{
    worksheet_part, worksheet_rels_part, write_app_props, write_content_types, write_core_props,
    write_shared_strings, write_workbook, DocProperties,
};
use super::relationships::{package_relationships, workbook_relationships, write_relationships};
use super::styles::Stylesheet;
use super::worksheet::SheetEncoder;
use super::xml_writer::XmlWriter;
use super::StreamingZipWriter;
use crate::error::{part_error, stream_error, ExcelError, Result};
use crate::types::CellValue;

/// Streaming workbook over a zip archive.
///
/// Exactly one worksheet part is open at a time. Rows go straight into that
/// part; the workbook-level parts are written by [`FastWorkbook::close`].
pub struct FastWorkbook<W: Write + Seek> {
    zip: StreamingZipWriter<W>,
    titles: Vec<String>,
    sheet_links: Vec<bool>,
    current: Option<SheetEncoder>,
}

impl<W: Write + Seek> FastWorkbook<W> {
    /// Take over an archive and write the package-level parts
    pub fn new(zip: StreamingZipWriter<W>, props: &DocProperties) -> Result<Self> {
        let mut workbook = FastWorkbook {
            zip,
            titles: Vec::new(),
            sheet_links: Vec::new(),
            current: None,
        };

        workbook.write_part("_rels/.rels", |xml| {
            write_relationships(xml, &package_relationships())
        })?;
        workbook.write_part("docProps/core.xml", |xml| write_core_props(xml, props))?;
        workbook.write_part("docProps/app.xml", |xml| write_app_props(xml))?;

        Ok(workbook)
    }

    /// Titles of the finished sheets, in order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Number of finished sheets
    pub fn sheet_count(&self) -> usize {
        self.titles.len()
    }

    /// Whether a worksheet part is currently open
    pub fn has_open_sheet(&self) -> bool {
        self.current.is_some()
    }

    /// Append a row to the open sheet, opening the next one if needed
    pub fn write_row<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = CellValue>,
    {
        if self.current.is_none() {
            self.open_sheet()?;
        }
        let sheet = self.titles.len() as u32 + 1;
        let encoder = self
            .current
            .as_mut()
            .ok_or_else(|| ExcelError::MissingPart(worksheet_part(sheet as usize)))?;

        let row = encoder.row_count() + 1;
        let encoded = encoder.write_row(values);

        // Whatever was encoded before a failure is already part of the sheet
        let flushed = self.zip.write_data(encoder.pending()).map_err(stream_error);
        encoder.clear_pending();

        encoded.map_err(|e| ExcelError::WriteRowError {
            row,
            sheet,
            source: Box::new(e),
        })?;
        flushed
    }

    /// Close the open sheet under `title`; an empty sheet is created if none is open
    pub fn finish_sheet(&mut self, title: &str) -> Result<()> {
        if self.current.is_none() {
            self.open_sheet()?;
        }
        let n = self.titles.len() + 1;
        let encoder = self
            .current
            .take()
            .ok_or_else(|| ExcelError::MissingPart(worksheet_part(n)))?;

        let finished = encoder.finish();
        self.zip.write_data(&finished.tail).map_err(stream_error)?;

        let has_links = !finished.relationships.is_empty();
        if has_links {
            self.write_part(&worksheet_rels_part(n), |xml| {
                write_relationships(xml, &finished.relationships)
            })?;
        }

        log::debug!(
            "finished worksheet {} ({:?}): {} rows, {} hyperlinks",
            n,
            title,
            finished.rows,
            finished.relationships.len()
        );

        self.titles.push(title.to_string());
        self.sheet_links.push(has_links);
        Ok(())
    }

    /// Finish the open sheet, write the workbook-level parts and the zip
    /// directory, and hand back the sink.
    ///
    /// An open sheet is titled "sheet N". A workbook without sheets gets one
    /// empty sheet.
    pub fn close(mut self, styles: &Stylesheet) -> Result<W> {
        if self.current.is_some() || self.titles.is_empty() {
            let title = format!("sheet {}", self.titles.len() + 1);
            self.finish_sheet(&title)?;
        }

        let titles = std::mem::take(&mut self.titles);
        let sheet_links = std::mem::take(&mut self.sheet_links);

        self.write_part("xl/workbook.xml", |xml| write_workbook(xml, &titles))?;
        self.write_part("xl/styles.xml", |xml| styles.write_xml(xml))?;
        self.write_part("xl/sharedStrings.xml", |xml| write_shared_strings(xml))?;
        self.write_part("xl/_rels/workbook.xml.rels", |xml| {
            write_relationships(xml, &workbook_relationships(titles.len()))
        })?;
        self.write_part("[Content_Types].xml", |xml| {
            write_content_types(xml, &sheet_links)
        })?;

        log::debug!(
            "finalizing package: {} sheets, {} number formats, {} cell formats",
            titles.len(),
            styles.num_fmts().len(),
            styles.cell_xf_count()
        );

        self.zip.finish().map_err(stream_error)
    }

    fn open_sheet(&mut self) -> Result<()> {
        let n = self.titles.len() + 1;
        let name = worksheet_part(n);
        self.zip
            .start_entry(&name)
            .map_err(|e| part_error(&name, e))?;

        let mut encoder = SheetEncoder::new();
        self.zip.write_data(encoder.pending()).map_err(stream_error)?;
        encoder.clear_pending();
        self.current = Some(encoder);

        log::debug!("opened worksheet part {}", name);
        Ok(())
    }

    /// Render a complete part and store it as its own entry
    fn write_part<F>(&mut self, name: &str, render: F) -> Result<()>
    where
        F: FnOnce(&mut XmlWriter<&mut Vec<u8>>) -> Result<()>,
    {
        let mut buffer = Vec::with_capacity(1024);
        render(&mut XmlWriter::new(&mut buffer))?;

        self.zip
            .start_entry(name)
            .map_err(|e| part_error(name, e))?;
        self.zip.write_data(&buffer).map_err(stream_error)
    }
}
