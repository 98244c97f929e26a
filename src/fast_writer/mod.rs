//! Streaming package writer
//!
//! This module turns rows into the parts of an xlsx package:
//! - Row data goes straight into the open worksheet entry
//! - Hyperlink records are held per sheet and written when it closes
//! - Style tables and the workbook-level parts are written on close
//!
//! The zip container comes from `s-zip`, which compresses each entry as it is
//! written so no temporary files are needed.

pub mod package;
pub mod relationships;
pub mod styles;
pub mod workbook;
pub mod worksheet;
pub mod xml_writer;

pub use package::DocProperties;
pub use relationships::Relationship;
pub use s_zip::StreamingZipWriter;
pub use styles::{NumFmt, Stylesheet, Xf};
pub use workbook::FastWorkbook;
pub use worksheet::{FinishedSheet, HyperlinkRecord, SheetEncoder};
pub use xml_writer::XmlWriter;
