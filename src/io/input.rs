//! Parsing of `x,y,point` input records
//!
//! Records are separated by whitespace, so one line may carry several of
//! them. Whitespace next to a comma belongs to the record it sits in. A
//! malformed record, including one with a value that does not fit in 8
//! bits, is skipped and reading continues with the next record.

use std::io::Read;
use std::path::Path;

use log::debug;

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::TileRecord;

/// Parse a single record, or `None` if it is malformed
///
/// Each comma-separated field is trimmed; a field with whitespace left
/// inside it does not parse as a number and rejects the record.
pub fn parse_record(record: &str) -> Option<TileRecord> {
    let mut fields = record.split(',').map(str::trim);

    let x = fields.next()?.parse::<u8>().ok()?;
    let y = fields.next()?.parse::<u8>().ok()?;
    let point = fields.next()?.parse::<u8>().ok()?;

    if fields.next().is_some() {
        return None;
    }

    Some(TileRecord::new(x, y, point))
}

/// Split a line into record candidates
///
/// Whitespace separates records unless a comma sits on either side of it.
fn split_records(line: &str) -> Vec<String> {
    let mut records: Vec<String> = Vec::new();
    let mut continues = false;

    for word in line.split_whitespace() {
        match records.last_mut() {
            Some(last) if continues || word.starts_with(',') => last.push_str(word),
            _ => records.push(word.to_owned()),
        }
        continues = word.ends_with(',');
    }

    records
}

/// Running totals of one parse
#[derive(Default)]
struct Collector {
    records: Vec<TileRecord>,
    skipped: usize,
}

impl Collector {
    fn line(&mut self, line: &str) {
        for candidate in split_records(line) {
            match parse_record(&candidate) {
                Some(record) => self.records.push(record),
                None => {
                    self.skipped += 1;
                    debug!("skipping malformed record {candidate:?}");
                }
            }
        }
    }

    fn finish(self) -> Vec<TileRecord> {
        debug!(
            "parsed {} records, skipped {}",
            self.records.len(),
            self.skipped
        );
        self.records
    }
}

/// Parse every well-formed record in `text`
pub fn parse_records(text: &str) -> Vec<TileRecord> {
    let mut collector = Collector::default();
    text.lines().for_each(|line| collector.line(line));
    collector.finish()
}

/// Read records from a stream until end of input
///
/// Lines are decoded independently, so invalid UTF-8 only spoils the
/// records on its own line.
///
/// # Errors
///
/// Returns `FileSystem` if the stream cannot be read
pub fn read_records(mut reader: impl Read, origin: &Path) -> Result<Vec<TileRecord>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| AlgorithmError::FileSystem {
            path: origin.to_path_buf(),
            operation: "read input",
            source,
        })?;

    let mut collector = Collector::default();
    for line in bytes.split(|&byte| byte == b'\n') {
        collector.line(&String::from_utf8_lossy(line));
    }

    Ok(collector.finish())
}
