//! CSV ingestion into a raw table

use crate::reader::{IoError, IoResult, RawTable};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a comma-separated file with a header row
pub fn read_csv(path: impl AsRef<Path>) -> IoResult<RawTable> {
    read_csv_with_delimiter(path, b',')
}

/// Read a delimited file with a header row
pub fn read_csv_with_delimiter(path: impl AsRef<Path>, delimiter: u8) -> IoResult<RawTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
    let table = read_delimited(BufReader::new(file), delimiter)?;
    tracing::debug!(
        "Read {} rows x {} columns from {}",
        table.num_rows(),
        table.headers().len(),
        path.display()
    );
    Ok(table)
}

/// Read comma-separated text from any reader
pub fn read_csv_from_reader<R: Read>(reader: R) -> IoResult<RawTable> {
    read_delimited(reader, b',')
}

fn read_delimited<R: Read>(reader: R, delimiter: u8) -> IoResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| IoError::InvalidFormat(e.to_string()))?
        .iter()
        .map(|s| s.trim().to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| match e.kind() {
            csv::ErrorKind::UnequalLengths { .. } => IoError::NotTabular(e.to_string()),
            _ => IoError::InvalidFormat(e.to_string()),
        })?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    RawTable::new(headers, rows)
}
