//! Fixed package parts: content types, workbook, shared strings, document properties

use super::relationships::worksheet_rel_id;
use super::xml_writer::{XmlWriter, NS_MAIN, NS_RELATIONSHIPS};
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;

const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const CT_SHARED_STRINGS: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPERTIES: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Path of the `n`th worksheet part (1-based)
pub(crate) fn worksheet_part(n: usize) -> String {
    format!("xl/worksheets/sheet{}.xml", n)
}

/// Path of the relationships part of the `n`th worksheet (1-based)
pub(crate) fn worksheet_rels_part(n: usize) -> String {
    format!("xl/worksheets/_rels/sheet{}.xml.rels", n)
}

/// Values for `docProps/core.xml` and `docProps/app.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocProperties {
    pub creator: String,
    pub created: DateTime<Utc>,
}

impl Default for DocProperties {
    fn default() -> Self {
        DocProperties {
            creator: "excelstream".to_string(),
            created: Utc::now(),
        }
    }
}

/// `[Content_Types].xml`
///
/// `sheet_links[i]` tells whether worksheet `i + 1` has a relationships part.
pub(crate) fn write_content_types<W: Write>(
    xml: &mut XmlWriter<W>,
    sheet_links: &[bool],
) -> Result<()> {
    xml.declaration()?;
    xml.start_element("Types")?;
    xml.attribute(
        "xmlns",
        "http://schemas.openxmlformats.org/package/2006/content-types",
    )?;
    xml.close_start_tag()?;

    default_type(xml, "rels", CT_RELATIONSHIPS)?;
    default_type(xml, "xml", "application/xml")?;

    override_type(xml, "/xl/workbook.xml", CT_WORKBOOK)?;
    override_type(xml, "/xl/styles.xml", CT_STYLES)?;
    override_type(xml, "/xl/sharedStrings.xml", CT_SHARED_STRINGS)?;
    override_type(xml, "/docProps/core.xml", CT_CORE_PROPERTIES)?;
    override_type(xml, "/docProps/app.xml", CT_EXTENDED_PROPERTIES)?;
    for (i, has_links) in sheet_links.iter().enumerate() {
        override_type(xml, &format!("/{}", worksheet_part(i + 1)), CT_WORKSHEET)?;
        if *has_links {
            override_type(
                xml,
                &format!("/{}", worksheet_rels_part(i + 1)),
                CT_RELATIONSHIPS,
            )?;
        }
    }

    xml.end_element("Types")?;
    xml.flush()
}

fn default_type<W: Write>(xml: &mut XmlWriter<W>, extension: &str, content_type: &str) -> Result<()> {
    xml.start_element("Default")?;
    xml.attribute("Extension", extension)?;
    xml.attribute("ContentType", content_type)?;
    xml.close_empty_element()
}

fn override_type<W: Write>(xml: &mut XmlWriter<W>, part: &str, content_type: &str) -> Result<()> {
    xml.start_element("Override")?;
    xml.attribute("PartName", part)?;
    xml.attribute("ContentType", content_type)?;
    xml.close_empty_element()
}

/// `xl/workbook.xml` listing every finished sheet in order
pub(crate) fn write_workbook<W: Write>(xml: &mut XmlWriter<W>, titles: &[String]) -> Result<()> {
    xml.declaration()?;
    xml.start_element("workbook")?;
    xml.attribute("xmlns", NS_MAIN)?;
    xml.attribute("xmlns:r", NS_RELATIONSHIPS)?;
    xml.close_start_tag()?;

    xml.start_element("sheets")?;
    xml.close_start_tag()?;
    for (i, title) in titles.iter().enumerate() {
        xml.start_element("sheet")?;
        xml.attribute("name", title)?;
        xml.attribute_int("sheetId", (i + 1) as u64)?;
        xml.attribute("r:id", &worksheet_rel_id(i + 1))?;
        xml.close_empty_element()?;
    }
    xml.end_element("sheets")?;

    xml.end_element("workbook")?;
    xml.flush()
}

/// `xl/sharedStrings.xml`. Text is always written inline, so this stays empty;
/// some readers expect the part to exist.
pub(crate) fn write_shared_strings<W: Write>(xml: &mut XmlWriter<W>) -> Result<()> {
    xml.declaration()?;
    xml.start_element("sst")?;
    xml.attribute("xmlns", NS_MAIN)?;
    xml.attribute_int("count", 0)?;
    xml.attribute_int("uniqueCount", 0)?;
    xml.close_empty_element()?;
    xml.flush()
}

pub(crate) fn write_core_props<W: Write>(xml: &mut XmlWriter<W>, props: &DocProperties) -> Result<()> {
    let created = props.created.to_rfc3339_opts(SecondsFormat::Secs, true);

    xml.declaration()?;
    xml.write_str(concat!(
        "<cp:coreProperties",
        " xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\"",
        " xmlns:dc=\"http://purl.org/dc/elements/1.1/\"",
        " xmlns:dcterms=\"http://purl.org/dc/terms/\"",
        " xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    ))?;
    xml.write_str("<dc:creator>")?;
    xml.write_escaped(&props.creator)?;
    xml.write_str("</dc:creator><cp:lastModifiedBy>")?;
    xml.write_escaped(&props.creator)?;
    xml.write_str("</cp:lastModifiedBy>")?;
    xml.write_str("<dcterms:created xsi:type=\"dcterms:W3CDTF\">")?;
    xml.write_str(&created)?;
    xml.write_str("</dcterms:created><dcterms:modified xsi:type=\"dcterms:W3CDTF\">")?;
    xml.write_str(&created)?;
    xml.write_str("</dcterms:modified>")?;
    xml.end_element("cp:coreProperties")?;
    xml.flush()
}

pub(crate) fn write_app_props<W: Write>(xml: &mut XmlWriter<W>) -> Result<()> {
    xml.declaration()?;
    xml.start_element("Properties")?;
    xml.attribute(
        "xmlns",
        "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
    )?;
    xml.close_start_tag()?;
    xml.write_str("<Application>ExcelStream</Application>")?;
    xml.end_element("Properties")?;
    xml.flush()
}
