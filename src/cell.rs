//! Normalized cell records and value coercion

use crate::date::serial_date;
use crate::error::{ExcelError, Result};
use crate::types::CellValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Cell type written to the `t` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    /// `n`
    Number,
    /// `b`
    Boolean,
    /// `inlineStr`
    InlineString,
    /// `s`, an index into the shared strings part
    SharedString,
    /// No `t` attribute; used by hand-built cells
    Unspecified,
}

impl CellType {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            CellType::Number => Some("n"),
            CellType::Boolean => Some("b"),
            CellType::InlineString => Some("inlineStr"),
            CellType::SharedString => Some("s"),
            CellType::Unspecified => None,
        }
    }
}

/// The single value a cell carries: either `<v>` or `<is><t>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Value(String),
    InlineString(String),
}

impl CellContent {
    pub fn text(&self) -> &str {
        match self {
            CellContent::Value(s) | CellContent::InlineString(s) => s,
        }
    }
}

/// A fully encoded cell.
///
/// Build one by hand and pass it as `CellValue::Cell` for full control; the
/// writer only fills in `reference`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// "A1" style reference
    pub reference: String,
    pub cell_type: CellType,
    /// Index into the cell format table
    pub style: Option<u32>,
    pub content: CellContent,
}

impl Cell {
    pub fn new(cell_type: CellType, content: CellContent) -> Self {
        Cell {
            reference: String::new(),
            cell_type,
            style: None,
            content,
        }
    }

    /// Numeric cell with the given text value
    pub fn number(value: impl Into<String>) -> Self {
        Cell::new(CellType::Number, CellContent::Value(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Cell::new(
            CellType::Boolean,
            CellContent::Value(if value { "1" } else { "0" }.to_string()),
        )
    }

    pub fn inline_string(text: impl Into<String>) -> Self {
        Cell::new(CellType::InlineString, CellContent::InlineString(text.into()))
    }

    pub fn with_style(mut self, style: u32) -> Self {
        self.style = Some(style);
        self
    }

    /// Visible text of the cell
    pub fn text(&self) -> &str {
        self.content.text()
    }
}

/// Hyperlink data held back until the sheet is closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLink {
    pub url: String,
    pub display: String,
    pub tooltip: String,
}

/// Result of coercing one input value
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    pub cell: Cell,
    pub link: Option<PendingLink>,
}

impl Coerced {
    fn plain(cell: Cell) -> Self {
        Coerced { cell, link: None }
    }
}

/// Turn an input value into a cell record.
///
/// Returns `Ok(None)` for `CellValue::Empty`: nothing is written for that
/// column. The reference of the returned cell is left for the caller.
pub fn coerce(value: CellValue) -> Result<Option<Coerced>> {
    let coerced = match value {
        CellValue::Empty => return Ok(None),
        CellValue::Cell(cell) => Coerced::plain(cell),
        CellValue::Int(i) => {
            let mut buf = itoa::Buffer::new();
            Coerced::plain(Cell::number(buf.format(i)))
        }
        CellValue::UInt(u) => {
            let mut buf = itoa::Buffer::new();
            Coerced::plain(Cell::number(buf.format(u)))
        }
        CellValue::Float(f) => {
            if !f.is_finite() {
                return Err(ExcelError::UnsupportedType(format!("non-finite float {}", f)));
            }
            Coerced::plain(Cell::number(format!("{:.6}", f)))
        }
        CellValue::Bool(b) => Coerced::plain(Cell::boolean(b)),
        CellValue::Bytes(bytes) => Coerced::plain(Cell::inline_string(STANDARD.encode(bytes))),
        CellValue::String(s) => Coerced::plain(Cell::inline_string(s)),
        CellValue::DateTime(ts) => Coerced::plain(Cell::number(serial_date(ts))),
        CellValue::Hyperlink(link) => Coerced {
            cell: Cell::inline_string(link.title.clone()),
            link: Some(PendingLink {
                url: link.url,
                display: link.title,
                tooltip: link.tooltip,
            }),
        },
        CellValue::Styled { style, value } => {
            return Ok(coerce(*value)?.map(|mut c| {
                c.cell.style = Some(style);
                c
            }));
        }
        other @ CellValue::Formula(_) => {
            return Err(ExcelError::UnsupportedType(other.type_name().to_string()))
        }
    };
    Ok(Some(coerced))
}

/// Coerce and attach a cell format id
pub fn apply_style(style: u32, value: CellValue) -> Result<Option<Coerced>> {
    coerce(value.with_style(style))
}

/// Column letters for a 0-based column index (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_name(col: u32) -> String {
    let mut buf = Vec::with_capacity(4);
    push_column_name(&mut buf, col);
    // only ASCII letters are pushed
    String::from_utf8(buf).unwrap_or_default()
}

/// Append the column letters for a 0-based column index
pub fn push_column_name(buffer: &mut Vec<u8>, col: u32) {
    let mut tmp = [0u8; 8];
    let mut len = 0;
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        tmp[len] = b'A' + (n % 26) as u8;
        len += 1;
        n /= 26;
    }
    buffer.extend(tmp[..len].iter().rev());
}

/// "A1" style reference from 0-based column and row
pub fn cell_reference(col: u32, row: u32) -> String {
    let mut buf = Vec::with_capacity(12);
    push_column_name(&mut buf, col);
    let mut num = itoa::Buffer::new();
    buf.extend_from_slice(num.format(u64::from(row) + 1).as_bytes());
    String::from_utf8(buf).unwrap_or_default()
}
