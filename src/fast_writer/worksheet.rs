//! Worksheet encoder: rows in, worksheet XML out
//!
//! Rows are encoded into an internal buffer which the workbook drains into the
//! archive after every row. Hyperlinks have to sit in a block after
//! `</sheetData>`, so their records are held until the sheet is finished.

use super::relationships::{Relationship, REL_HYPERLINK};
use super::xml_writer::{escape_into, NS_MAIN, NS_RELATIONSHIPS, XML_DECLARATION};
use crate::cell::{cell_reference, coerce, Cell, CellContent, PendingLink};
use crate::error::Result;
use crate::types::CellValue;

/// An entry of the trailing `<hyperlinks>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkRecord {
    pub relationship_id: String,
    pub reference: String,
    pub display: String,
    pub tooltip: String,
}

/// Hyperlink bookkeeping of one sheet
#[derive(Debug, Default)]
pub struct SheetLinks {
    hyperlinks: Vec<HyperlinkRecord>,
    relationships: Vec<Relationship>,
}

impl SheetLinks {
    /// Register an external link for the cell at `reference`
    fn add(&mut self, reference: &str, link: PendingLink) {
        let id = format!("linkId{}", self.relationships.len() + 1);
        self.relationships
            .push(Relationship::external(id.clone(), REL_HYPERLINK, link.url));
        self.hyperlinks.push(HyperlinkRecord {
            relationship_id: id,
            reference: reference.to_string(),
            display: link.display,
            tooltip: link.tooltip,
        });
    }

    pub fn hyperlinks(&self) -> &[HyperlinkRecord] {
        &self.hyperlinks
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Whether the sheet has any links, and so needs a relationships part
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

/// What is left of a sheet after `finish`
#[derive(Debug)]
pub struct FinishedSheet {
    /// Closing XML still to be written to the worksheet part
    pub tail: Vec<u8>,
    /// Relationships for the sibling `.rels` part; empty when there are no links
    pub relationships: Vec<Relationship>,
    pub rows: u32,
}

/// Streaming worksheet encoder
pub struct SheetEncoder {
    buffer: Vec<u8>,
    rows: u32,
    links: SheetLinks,
}

impl SheetEncoder {
    /// Start a worksheet; the header is already in the pending output
    pub fn new() -> Self {
        let mut buffer = Vec::with_capacity(4096);
        buffer.extend_from_slice(XML_DECLARATION.as_bytes());
        buffer.extend_from_slice(b"<worksheet xmlns=\"");
        buffer.extend_from_slice(NS_MAIN.as_bytes());
        buffer.extend_from_slice(b"\" xmlns:r=\"");
        buffer.extend_from_slice(NS_RELATIONSHIPS.as_bytes());
        buffer.extend_from_slice(b"\"><sheetData>");

        SheetEncoder {
            buffer,
            rows: 0,
            links: SheetLinks::default(),
        }
    }

    /// Encode one row.
    ///
    /// `Empty` values leave their column out. On a coercion error the row is
    /// left unterminated in the pending output and the error is returned.
    pub fn write_row<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = CellValue>,
    {
        let mut num = itoa::Buffer::new();
        let row_num = num.format(u64::from(self.rows) + 1);

        self.buffer.extend_from_slice(b"<row r=\"");
        self.buffer.extend_from_slice(row_num.as_bytes());
        self.buffer.extend_from_slice(b"\">");

        for (col_idx, value) in values.into_iter().enumerate() {
            let Some(coerced) = coerce(value)? else {
                continue;
            };
            let mut cell = coerced.cell;

            cell.reference = cell_reference(col_idx as u32, self.rows);

            write_cell(&mut self.buffer, &cell);

            if let Some(link) = coerced.link {
                self.links.add(&cell.reference, link);
            }
        }

        self.buffer.extend_from_slice(b"</row>");
        self.rows += 1;
        log::trace!("encoded row {}", self.rows);
        Ok(())
    }

    /// Output produced since the last call
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn clear_pending(&mut self) {
        self.buffer.clear();
    }

    /// Rows written so far
    pub fn row_count(&self) -> u32 {
        self.rows
    }

    pub fn links(&self) -> &SheetLinks {
        &self.links
    }

    /// Close `sheetData`, emit the hyperlink block and close the worksheet
    pub fn finish(mut self) -> FinishedSheet {
        self.buffer.extend_from_slice(b"</sheetData>");

        if !self.links.is_empty() {
            self.buffer.extend_from_slice(b"<hyperlinks>");
            for link in &self.links.hyperlinks {
                self.buffer.extend_from_slice(b"<hyperlink r:id=\"");
                escape_into(&mut self.buffer, &link.relationship_id);
                self.buffer.extend_from_slice(b"\" ref=\"");
                escape_into(&mut self.buffer, &link.reference);
                self.buffer.extend_from_slice(b"\" display=\"");
                escape_into(&mut self.buffer, &link.display);
                self.buffer.extend_from_slice(b"\" tooltip=\"");
                escape_into(&mut self.buffer, &link.tooltip);
                self.buffer.extend_from_slice(b"\"/>");
            }
            self.buffer.extend_from_slice(b"</hyperlinks>");
        }

        self.buffer.extend_from_slice(b"</worksheet>");

        FinishedSheet {
            tail: self.buffer,
            relationships: self.links.relationships,
            rows: self.rows,
        }
    }
}

impl Default for SheetEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `<c>` for one cell
fn write_cell(buffer: &mut Vec<u8>, cell: &Cell) {
    buffer.extend_from_slice(b"<c r=\"");
    buffer.extend_from_slice(cell.reference.as_bytes());
    buffer.push(b'"');

    if let Some(t) = cell.cell_type.as_str() {
        buffer.extend_from_slice(b" t=\"");
        buffer.extend_from_slice(t.as_bytes());
        buffer.push(b'"');
    }
    if let Some(style) = cell.style {
        let mut num = itoa::Buffer::new();
        buffer.extend_from_slice(b" s=\"");
        buffer.extend_from_slice(num.format(style).as_bytes());
        buffer.push(b'"');
    }

    match &cell.content {
        CellContent::InlineString(text) => {
            if needs_space_preserve(text) {
                buffer.extend_from_slice(b"><is><t xml:space=\"preserve\">");
            } else {
                buffer.extend_from_slice(b"><is><t>");
            }
            escape_into(buffer, text);
            buffer.extend_from_slice(b"</t></is></c>");
        }
        CellContent::Value(value) => {
            buffer.extend_from_slice(b"><v>");
            escape_into(buffer, value);
            buffer.extend_from_slice(b"</v></c>");
        }
    }
}

fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}
