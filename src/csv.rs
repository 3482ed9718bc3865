// src/csv.rs
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};

use crate::data::{Table, Value};
use crate::error::Result;

/* ---------------- Reading ---------------- */

/// Parse delimited text with a header row. Short rows are padded with blanks,
/// long rows are cut to the header width.
pub fn read_table<R: Read>(reader: R, delim: u8) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let mut row: Vec<Option<Value>> = rec.iter().take(width).map(Value::from_stored).collect();
        row.resize(width, None);
        rows.push(row);
    }
    Ok(Table::new(headers, rows))
}

pub fn read_table_from_path(path: &Path, delim: u8) -> Result<Table> {
    let file = File::open(path)?;
    read_table(BufReader::new(file), delim)
}

/* ---------------- Writing ---------------- */

/// Header line, then one line per row. Blank cells are empty fields.
pub fn write_table<W: Write>(writer: W, table: &Table, delim: u8) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(delim).from_writer(writer);

    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| match cell {
            Some(v) => v.to_string(),
            None => s!(),
        }))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create or truncate `path` and write `table` to it.
pub fn write_table_to_path(path: &Path, table: &Table, delim: u8) -> Result<()> {
    let file = File::create(path)?;
    write_table(BufWriter::new(file), table, delim)
}

/// Whole table as a string (logs, tests).
pub fn table_to_string(table: &Table, delim: u8) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_table(&mut buf, table, delim);
    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
