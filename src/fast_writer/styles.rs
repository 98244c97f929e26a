//! Workbook-wide number format and cell format tables
//!
//! Every distinct format must be declared once in `xl/styles.xml` and is
//! referenced by index from cells. The tables here are append-only, so an id
//! handed out stays valid for the life of the workbook.

use super::xml_writer::{XmlWriter, NS_MAIN};
use crate::error::Result;
use indexmap::IndexSet;
use std::io::Write;

/// Custom number format ids are allocated above this value
const CUSTOM_NUM_FMT_BASE: u32 = 163;

/// Number formats with fixed ids
const BUILTIN_NUM_FMTS: [(&str, u32); 3] = [("0", 1), ("0.00", 2), ("#,##0", 3)];

/// A custom number format
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumFmt {
    pub id: u32,
    pub code: String,
}

/// A style record, used both for named cell styles and direct cell formats.
///
/// Records are compared structurally; the position in its table is the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xf {
    pub num_fmt_id: u32,
    pub font_id: u32,
    pub fill_id: u32,
    pub border_id: u32,
    pub apply_number_format: bool,
    /// Parent entry in the cell style table
    pub xf_id: Option<u32>,
}

/// Style tables of one workbook
#[derive(Debug, Clone)]
pub struct Stylesheet {
    num_fmts: Vec<NumFmt>,
    cell_style_xfs: IndexSet<Xf>,
    cell_xfs: IndexSet<Xf>,
}

impl Stylesheet {
    /// Create the tables with the default style at index 0 of both
    pub fn new() -> Self {
        let mut styles = Stylesheet {
            num_fmts: Vec::new(),
            cell_style_xfs: IndexSet::new(),
            cell_xfs: IndexSet::new(),
        };
        let normal = styles.cell_style_xf_id(Xf::default());
        styles.cell_xf_id(Xf {
            xf_id: Some(normal),
            ..Xf::default()
        });
        styles
    }

    /// Id for a number format code, allocating a custom id on first use
    pub fn num_fmt_id(&mut self, code: &str) -> u32 {
        if let Some(&(_, id)) = BUILTIN_NUM_FMTS.iter().find(|(c, _)| *c == code) {
            return id;
        }

        let mut max = CUSTOM_NUM_FMT_BASE;
        for fmt in &self.num_fmts {
            if fmt.code == code {
                return fmt.id;
            }
            max = max.max(fmt.id);
        }

        let id = max + 1;
        self.num_fmts.push(NumFmt {
            id,
            code: code.to_string(),
        });
        id
    }

    /// Position of `xf` in the cell format table, appending it if new
    pub fn cell_xf_id(&mut self, xf: Xf) -> u32 {
        self.cell_xfs.insert_full(xf).0 as u32
    }

    /// Position of `xf` in the cell style table, appending it if new
    pub fn cell_style_xf_id(&mut self, xf: Xf) -> u32 {
        self.cell_style_xfs.insert_full(xf).0 as u32
    }

    pub fn num_fmts(&self) -> &[NumFmt] {
        &self.num_fmts
    }

    pub fn cell_xfs(&self) -> impl Iterator<Item = &Xf> {
        self.cell_xfs.iter()
    }

    pub fn cell_style_xfs(&self) -> impl Iterator<Item = &Xf> {
        self.cell_style_xfs.iter()
    }

    pub fn cell_xf_count(&self) -> usize {
        self.cell_xfs.len()
    }

    pub fn cell_style_xf_count(&self) -> usize {
        self.cell_style_xfs.len()
    }

    /// Write the `xl/styles.xml` part
    pub fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        xml.declaration()?;
        xml.start_element("styleSheet")?;
        xml.attribute("xmlns", NS_MAIN)?;
        xml.close_start_tag()?;

        xml.start_element("numFmts")?;
        xml.attribute_int("count", self.num_fmts.len() as u64)?;
        xml.close_start_tag()?;
        for fmt in &self.num_fmts {
            xml.start_element("numFmt")?;
            xml.attribute_int("numFmtId", u64::from(fmt.id))?;
            xml.attribute("formatCode", &fmt.code)?;
            xml.close_empty_element()?;
        }
        xml.end_element("numFmts")?;

        // Fonts, fills and borders are single fixed placeholders
        xml.write_str(concat!(
            "<fonts count=\"1\"><font><sz val=\"11\"/><name val=\"Calibri\"/></font></fonts>",
            "<fills count=\"1\"><fill><patternFill patternType=\"none\"/></fill></fills>",
            "<borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>",
        ))?;

        write_xfs(xml, "cellStyleXfs", &self.cell_style_xfs)?;
        write_xfs(xml, "cellXfs", &self.cell_xfs)?;

        xml.end_element("styleSheet")?;
        xml.flush()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

fn write_xfs<W: Write>(xml: &mut XmlWriter<W>, name: &str, xfs: &IndexSet<Xf>) -> Result<()> {
    xml.start_element(name)?;
    xml.attribute_int("count", xfs.len() as u64)?;
    xml.close_start_tag()?;
    for xf in xfs {
        xml.start_element("xf")?;
        xml.attribute_int("numFmtId", u64::from(xf.num_fmt_id))?;
        xml.attribute_int("fontId", u64::from(xf.font_id))?;
        xml.attribute_int("fillId", u64::from(xf.fill_id))?;
        xml.attribute_int("borderId", u64::from(xf.border_id))?;
        if xf.apply_number_format {
            xml.attribute("applyNumberFormat", "1")?;
        }
        if let Some(parent) = xf.xf_id {
            xml.attribute_int("xfId", u64::from(parent))?;
        }
        xml.close_empty_element()?;
    }
    xml.end_element(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entries() {
        let styles = Stylesheet::new();
        assert_eq!(styles.cell_style_xf_count(), 1);
        assert_eq!(styles.cell_xf_count(), 1);
        assert!(styles.num_fmts().is_empty());
        assert_eq!(
            styles.cell_xfs().next(),
            Some(&Xf {
                xf_id: Some(0),
                ..Xf::default()
            })
        );
    }

    #[test]
    fn test_builtin_num_fmts() {
        let mut styles = Stylesheet::new();
        assert_eq!(styles.num_fmt_id("0"), 1);
        assert_eq!(styles.num_fmt_id("0.00"), 2);
        assert_eq!(styles.num_fmt_id("#,##0"), 3);
        assert!(styles.num_fmts().is_empty());
    }

    #[test]
    fn test_custom_num_fmts() {
        let mut styles = Stylesheet::new();
        assert_eq!(styles.num_fmt_id("0.000"), 164);
        assert_eq!(styles.num_fmt_id("mm-dd-yy"), 165);
        assert_eq!(styles.num_fmt_id("0.000"), 164);
        assert_eq!(styles.num_fmts().len(), 2);
    }

    #[test]
    fn test_xf_dedup() {
        let mut styles = Stylesheet::new();
        let a = Xf {
            num_fmt_id: 164,
            apply_number_format: true,
            xf_id: Some(0),
            ..Xf::default()
        };
        let b = Xf { num_fmt_id: 2, ..a };

        assert_eq!(styles.cell_xf_id(a), 1);
        assert_eq!(styles.cell_xf_id(b), 2);
        assert_eq!(styles.cell_xf_id(a), 1);
        assert_eq!(styles.cell_xf_id(Xf { xf_id: Some(0), ..Xf::default() }), 0);

        assert_eq!(styles.cell_style_xf_id(Xf::default()), 0);
        assert_eq!(styles.cell_style_xf_id(a), 1);
        assert_eq!(styles.cell_xf_count(), 3);
    }

    #[test]
    fn test_write_xml() {
        let mut styles = Stylesheet::new();
        let fmt = styles.num_fmt_id("0.0%\"x\"");
        styles.cell_xf_id(Xf {
            num_fmt_id: fmt,
            apply_number_format: true,
            xf_id: Some(0),
            ..Xf::default()
        });

        let mut out = Vec::new();
        styles.write_xml(&mut XmlWriter::new(&mut out)).unwrap();
        let xml = String::from_utf8(out).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(
            "<numFmts count=\"1\"><numFmt numFmtId=\"164\" formatCode=\"0.0%&quot;x&quot;\"/></numFmts>"
        ));
        assert!(xml.contains(
            "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>"
        ));
        assert!(xml.contains(
            "<xf numFmtId=\"164\" fontId=\"0\" fillId=\"0\" borderId=\"0\" applyNumberFormat=\"1\" xfId=\"0\"/>"
        ));
        assert!(xml.contains("<cellXfs count=\"2\">"));
        assert!(xml.ends_with("</styleSheet>"));
    }
}
