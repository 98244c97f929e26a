//! Relationship records and `.rels` parts

use super::xml_writer::{XmlWriter, NS_PACKAGE_RELATIONSHIPS};
use crate::error::Result;
use std::io::Write;

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
pub const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const REL_SHARED_STRINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
pub const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// A typed link from one part to another part or to an external resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
    /// Written as `TargetMode="External"`
    pub external: bool,
}

impl Relationship {
    pub fn internal(id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) -> Self {
        Relationship {
            id: id.into(),
            rel_type,
            target: target.into(),
            external: false,
        }
    }

    pub fn external(id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) -> Self {
        Relationship {
            external: true,
            ..Self::internal(id, rel_type, target)
        }
    }
}

/// Relationship id of the `n`th worksheet (1-based) in the workbook rels
pub(crate) fn worksheet_rel_id(n: usize) -> String {
    format!("rId{}", n)
}

/// Write a complete `.rels` part
pub fn write_relationships<W: Write>(xml: &mut XmlWriter<W>, rels: &[Relationship]) -> Result<()> {
    xml.declaration()?;
    xml.start_element("Relationships")?;
    xml.attribute("xmlns", NS_PACKAGE_RELATIONSHIPS)?;
    xml.close_start_tag()?;

    for rel in rels {
        xml.start_element("Relationship")?;
        xml.attribute("Id", &rel.id)?;
        xml.attribute("Type", rel.rel_type)?;
        xml.attribute("Target", &rel.target)?;
        if rel.external {
            xml.attribute("TargetMode", "External")?;
        }
        xml.close_empty_element()?;
    }

    xml.end_element("Relationships")?;
    xml.flush()
}

/// Relationships of `xl/workbook.xml`: styles, shared strings, then one per worksheet
pub(crate) fn workbook_relationships(sheet_count: usize) -> Vec<Relationship> {
    let mut rels = Vec::with_capacity(sheet_count + 2);
    rels.push(Relationship::internal(
        format!("rId{}", sheet_count + 1),
        REL_STYLES,
        "styles.xml",
    ));
    rels.push(Relationship::internal(
        format!("rId{}", sheet_count + 2),
        REL_SHARED_STRINGS,
        "sharedStrings.xml",
    ));
    for n in 1..=sheet_count {
        rels.push(Relationship::internal(
            worksheet_rel_id(n),
            REL_WORKSHEET,
            format!("worksheets/sheet{}.xml", n),
        ));
    }
    rels
}

/// Relationships of the package root
pub(crate) fn package_relationships() -> Vec<Relationship> {
    vec![
        Relationship::internal("rId1", REL_OFFICE_DOCUMENT, "xl/workbook.xml"),
        Relationship::internal("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        Relationship::internal("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rels: &[Relationship]) -> String {
        let mut out = Vec::new();
        write_relationships(&mut XmlWriter::new(&mut out), rels).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_external_target() {
        let xml = render(&[Relationship::external(
            "linkId1",
            REL_HYPERLINK,
            "http://example.com/?a=1&b=2",
        )]);
        assert!(xml.contains(
            "<Relationship Id=\"linkId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" Target=\"http://example.com/?a=1&amp;b=2\" TargetMode=\"External\"/>"
        ));
    }

    #[test]
    fn test_workbook_relationships() {
        let rels = workbook_relationships(2);
        let ids: Vec<_> = rels.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rId3", "rId4", "rId1", "rId2"]);
        assert_eq!(rels[0].rel_type, REL_STYLES);
        assert_eq!(rels[1].rel_type, REL_SHARED_STRINGS);
        assert_eq!(rels[3].target, "worksheets/sheet2.xml");
        assert!(rels.iter().all(|r| !r.external));
    }

    #[test]
    fn test_package_points_at_workbook() {
        let xml = render(&package_relationships());
        assert!(xml.contains("Id=\"rId1\""));
        assert!(xml.contains("Target=\"xl/workbook.xml\""));
        assert!(!xml.contains("TargetMode"));
    }
}
