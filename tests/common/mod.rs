//! Minimal xlsx reader used to verify written packages

#![allow(dead_code)]

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// One `<c>` element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellData {
    pub reference: String,
    pub cell_type: Option<String>,
    pub style: Option<u32>,
    pub value: String,
}

/// One `<row>` element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowData {
    pub number: u32,
    pub cells: Vec<CellData>,
}

impl RowData {
    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.value.as_str()).collect()
    }

    pub fn references(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.reference.as_str()).collect()
    }
}

/// One `<hyperlink>` of a worksheet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkData {
    pub relationship_id: String,
    pub reference: String,
    pub display: String,
    pub tooltip: String,
}

/// One `<Relationship>` of a `.rels` part
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelData {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

/// An unpacked xlsx package
pub struct Package {
    parts: HashMap<String, String>,
    order: Vec<String>,
}

impl Package {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip archive");
        let mut parts = HashMap::new();
        let mut order = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut text = String::new();
            file.read_to_string(&mut text).unwrap();
            order.push(file.name().to_string());
            parts.insert(file.name().to_string(), text);
        }
        Package { parts, order }
    }

    pub fn from_path(path: &std::path::Path) -> Self {
        Self::from_bytes(std::fs::read(path).unwrap())
    }

    /// Entry names in archive order
    pub fn part_names(&self) -> &[String] {
        &self.order
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn part(&self, name: &str) -> &str {
        self.parts
            .get(name)
            .unwrap_or_else(|| panic!("missing part {}", name))
    }

    pub fn sheet_titles(&self) -> Vec<String> {
        let mut titles = Vec::new();
        for_each_element(self.part("xl/workbook.xml"), |e| {
            if e.local_name().as_ref() == b"sheet" {
                titles.push(attr(e, b"name").unwrap_or_default());
            }
        });
        titles
    }

    /// Rows of the `n`th worksheet (1-based)
    pub fn rows(&self, n: usize) -> Vec<RowData> {
        parse_rows(self.part(&format!("xl/worksheets/sheet{}.xml", n)))
    }

    pub fn hyperlinks(&self, n: usize) -> Vec<LinkData> {
        let mut links = Vec::new();
        for_each_element(self.part(&format!("xl/worksheets/sheet{}.xml", n)), |e| {
            if e.local_name().as_ref() == b"hyperlink" {
                links.push(LinkData {
                    relationship_id: attr(e, b"r:id").unwrap_or_default(),
                    reference: attr(e, b"ref").unwrap_or_default(),
                    display: attr(e, b"display").unwrap_or_default(),
                    tooltip: attr(e, b"tooltip").unwrap_or_default(),
                });
            }
        });
        links
    }

    pub fn relationships(&self, part: &str) -> Vec<RelData> {
        let mut rels = Vec::new();
        for_each_element(self.part(part), |e| {
            if e.local_name().as_ref() == b"Relationship" {
                rels.push(RelData {
                    id: attr(e, b"Id").unwrap_or_default(),
                    rel_type: attr(e, b"Type").unwrap_or_default(),
                    target: attr(e, b"Target").unwrap_or_default(),
                    external: attr(e, b"TargetMode").as_deref() == Some("External"),
                });
            }
        });
        rels
    }

    /// `(numFmtId, formatCode)` pairs of the stylesheet
    pub fn num_fmts(&self) -> Vec<(u32, String)> {
        let mut fmts = Vec::new();
        for_each_element(self.part("xl/styles.xml"), |e| {
            if e.local_name().as_ref() == b"numFmt" {
                let id = attr(e, b"numFmtId").and_then(|v| v.parse().ok()).unwrap_or(0);
                fmts.push((id, attr(e, b"formatCode").unwrap_or_default()));
            }
        });
        fmts
    }

    /// `numFmtId` of every `cellXfs` entry
    pub fn cell_xf_num_fmts(&self) -> Vec<u32> {
        let mut reader = Reader::from_str(self.part("xl/styles.xml"));
        let mut in_cell_xfs = false;
        let mut ids = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = true,
                Event::End(e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
                Event::Start(e) | Event::Empty(e)
                    if in_cell_xfs && e.local_name().as_ref() == b"xf" =>
                {
                    ids.push(attr(&e, b"numFmtId").and_then(|v| v.parse().ok()).unwrap_or(0));
                }
                Event::Eof => break,
                _ => {}
            }
        }
        ids
    }
}

fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .map(|a| a.unwrap())
        .find(|a| a.key.as_ref() == name)
        .map(|a| a.unescape_value().unwrap().into_owned())
}

/// Call `f` for every start and empty element
fn for_each_element<F: FnMut(&BytesStart<'_>)>(xml: &str, mut f: F) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => f(&e),
            Event::Eof => break,
            _ => {}
        }
    }
}

fn parse_rows(xml: &str) -> Vec<RowData> {
    let mut reader = Reader::from_str(xml);
    let mut rows: Vec<RowData> = Vec::new();
    let mut cell: Option<CellData> = None;
    let mut in_text = false;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => rows.push(row_from(&e)),
                b"c" => cell = Some(cell_from(&e)),
                b"v" | b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => rows.push(row_from(&e)),
                b"c" => {
                    if let Some(row) = rows.last_mut() {
                        row.cells.push(cell_from(&e));
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(c) = cell.as_mut() {
                    c.value.push_str(&t.unescape().unwrap());
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_text = false,
                b"c" => {
                    if let (Some(row), Some(c)) = (rows.last_mut(), cell.take()) {
                        row.cells.push(c);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    rows
}

fn row_from(e: &BytesStart<'_>) -> RowData {
    RowData {
        number: attr(e, b"r").and_then(|v| v.parse().ok()).unwrap_or(0),
        cells: Vec::new(),
    }
}

fn cell_from(e: &BytesStart<'_>) -> CellData {
    CellData {
        reference: attr(e, b"r").unwrap_or_default(),
        cell_type: attr(e, b"t"),
        style: attr(e, b"s").and_then(|v| v.parse().ok()),
        value: String::new(),
    }
}

/// Seekable sink that rejects every write once `limit` bytes were accepted
pub struct FailingSink {
    inner: Cursor<Vec<u8>>,
    limit: usize,
}

impl FailingSink {
    pub fn new(limit: usize) -> Self {
        FailingSink {
            inner: Cursor::new(Vec::new()),
            limit,
        }
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.get_ref().len() + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FailingSink {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
