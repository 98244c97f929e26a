//! Type definitions for values passed to `write_row`

use crate::cell::Cell;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Date display format for timestamp cells
pub const DEFAULT_DATE_FORMAT: &str = "mm-dd-yy";

/// Date and time display format for timestamp cells
pub const DEFAULT_DATETIME_FORMAT: &str = "mm-dd-yy hh:mm";

/// A hyperlink cell: the title is shown, the url and tooltip are written at sheet close
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperlink {
    pub url: String,
    pub title: String,
    pub tooltip: String,
}

impl Hyperlink {
    pub fn new(url: impl Into<String>, title: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Hyperlink {
            url: url.into(),
            title: title.into(),
            tooltip: tooltip.into(),
        }
    }
}

/// A single value handed to `write_row`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Nothing is written for this column
    #[default]
    Empty,
    /// Signed integer of any width
    Int(i64),
    /// Unsigned integer of any width
    UInt(u64),
    /// Float, written with 6 fractional digits
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Raw bytes, written as base64 text
    Bytes(Vec<u8>),
    /// String value, written inline
    String(String),
    /// Wall-clock timestamp, written as a spreadsheet serial date.
    /// Pair it with a date format via `format`, otherwise it shows as a plain number.
    DateTime(NaiveDateTime),
    /// Hyperlink to an external url
    Hyperlink(Hyperlink),
    /// Pre-built cell, written as-is apart from its reference
    Cell(Cell),
    /// A value with a cell format id attached, see `ExcelWriter::format`
    Styled { style: u32, value: Box<CellValue> },
    /// Formula value. Formulas are not supported by the streaming writer and
    /// are rejected when the row is written.
    Formula(String),
}

impl CellValue {
    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Attach a cell format id
    pub fn with_style(self, style: u32) -> Self {
        CellValue::Styled {
            style,
            value: Box::new(self),
        }
    }

    /// Variant name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Int(_) => "int",
            CellValue::UInt(_) => "uint",
            CellValue::Float(_) => "float",
            CellValue::Bool(_) => "bool",
            CellValue::Bytes(_) => "bytes",
            CellValue::String(_) => "string",
            CellValue::DateTime(_) => "datetime",
            CellValue::Hyperlink(_) => "hyperlink",
            CellValue::Cell(_) => "cell",
            CellValue::Styled { .. } => "styled",
            CellValue::Formula(_) => "formula",
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for CellValue {
                fn from(v: $t) -> Self {
                    CellValue::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64, u8, u16, u32, u64, usize);

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<f32> for CellValue {
    fn from(f: f32) -> Self {
        CellValue::Float(f64::from(f))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::String(s.clone())
    }
}

impl From<Vec<u8>> for CellValue {
    fn from(b: Vec<u8>) -> Self {
        CellValue::Bytes(b)
    }
}

impl From<&[u8]> for CellValue {
    fn from(b: &[u8]) -> Self {
        CellValue::Bytes(b.to_vec())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::DateTime(d.and_time(chrono::NaiveTime::MIN))
    }
}

/// Zoned timestamps keep their local wall-clock fields; the zone itself is dropped
impl<Tz: TimeZone> From<DateTime<Tz>> for CellValue {
    fn from(dt: DateTime<Tz>) -> Self {
        CellValue::DateTime(dt.naive_local())
    }
}

impl From<Hyperlink> for CellValue {
    fn from(link: Hyperlink) -> Self {
        CellValue::Hyperlink(link)
    }
}

impl From<Cell> for CellValue {
    fn from(cell: Cell) -> Self {
        CellValue::Cell(cell)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}
