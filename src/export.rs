//! CSV export of extraction results
//!
//! Produces RFC 4180 output with the header `Character,Type,Path,Content`.
//! Content must survive spreadsheet round-trips byte for byte (embedded
//! commas, quotes and newlines included), so quoting is left to the csv
//! crate rather than done by hand.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::extract::DialogueRecord;

/// Placeholder character name for records with no `Name` metadata.
const UNKNOWN_CHARACTER: &str = "Unknown";

/// Write records as CSV to `writer`, header row included.
///
/// # Errors
/// Returns an error if writing to the underlying stream fails.
pub fn write_csv<W: Write>(records: &[DialogueRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Character", "Type", "Path", "Content"])?;

    for record in records {
        let content = record.content_text();
        csv.write_record([
            record.character.as_deref().unwrap_or(UNKNOWN_CHARACTER),
            record.kind.as_str(),
            record.path.as_str(),
            content.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Render records as a CSV string.
///
/// # Errors
/// Returns an error if CSV serialization fails.
pub fn csv_string(records: &[DialogueRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write records as a CSV file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn export_csv<P: AsRef<Path>>(records: &[DialogueRecord], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv(records, BufWriter::new(file))
}
