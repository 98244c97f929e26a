//! Basic example of writing an xlsx file
//!
//! Every row carries its expected rendering, so the output can be checked by
//! opening it in a spreadsheet application.

use chrono::NaiveDate;
use excelstream_xlsx::types::{CellValue, Hyperlink, DEFAULT_DATETIME_FORMAT};
use excelstream_xlsx::ExcelWriter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = ExcelWriter::create("demos/output.xlsx")?;

    writer.write_row(["a string", "hello world!", "expected: 'hello world!'"])?;
    writer.write_row(["also a string", "14", "expected: '14'"])?;
    writer.write_row(vec![
        CellValue::from("a number"),
        CellValue::from(14),
        CellValue::from("expected: 14"),
    ])?;

    let negative = writer.format("#,##0 ;[red](#,##0)", -14);
    writer.write_row(vec![
        CellValue::from("a negative number"),
        negative,
        CellValue::from("expected: (14) in red"),
    ])?;

    writer.write_row(vec![
        CellValue::from("a float"),
        CellValue::from(3.1415),
        CellValue::from("expected: 3.1415"),
    ])?;
    let two_places = writer.format("0.00", 3.1415);
    writer.write_row(vec![
        CellValue::from("a float, formatted"),
        two_places,
        CellValue::from("expected: 3.14"),
    ])?;
    let three_places = writer.format("0.000", 3.1415);
    writer.write_row(vec![
        CellValue::from("a float, also formatted"),
        three_places,
        CellValue::from("expected: 3.142"),
    ])?;

    writer.write_row(vec![
        CellValue::from("a link"),
        Hyperlink::new("http://example.com", "clickme", "I'm a tooltip").into(),
        CellValue::from("expected: link to http://example.com titled 'clickme'"),
    ])?;

    let stamp = NaiveDate::from_ymd_opt(2010, 10, 10)
        .and_then(|d| d.and_hms_opt(10, 10, 10))
        .ok_or("invalid date")?;
    let stamp = writer.format(DEFAULT_DATETIME_FORMAT, stamp);
    writer.write_row(vec![
        CellValue::from("a datetime"),
        stamp,
        CellValue::from("expected: 10-10-10 10:10"),
    ])?;

    writer.write_row(vec![
        CellValue::from("bools"),
        CellValue::from(true),
        CellValue::from(false),
    ])?;
    writer.write_row(vec![
        CellValue::from("empty cell"),
        CellValue::Empty,
        CellValue::from("<-- empty cell"),
    ])?;
    writer.write_row(Vec::<CellValue>::new())?;
    writer.write_row(["there should be another sheet with a single value"])?;
    writer.write_sheet("that was sheet 1")?;

    writer.write_row(["13"])?;
    writer.write_sheet("that was sheet 2")?;

    writer.close()?;

    println!("Excel file created successfully: demos/output.xlsx");
    Ok(())
}
