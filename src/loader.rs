//! Input loading and validation
//!
//! Reads a JSON export into memory and parses it into a
//! [`serde_json::Value`]. The whole document is parsed before extraction
//! begins; there is no streaming path. The size ceiling is checked against
//! the raw byte length before any parse attempt so oversized input never
//! reaches the parser.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Maximum accepted input size: 100 MiB.
pub const MAX_FILE_SIZE: u64 = 104_857_600;

/// Load and parse a JSON export from disk.
///
/// The on-disk size is checked via metadata before the file is read.
///
/// # Errors
/// Returns [`Error::FileTooLarge`] if the file exceeds [`MAX_FILE_SIZE`],
/// [`Error::Io`] if it cannot be read, or [`Error::InvalidJson`] if it is
/// not valid JSON text.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let size = fs::metadata(path.as_ref())?.len();
    if size > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge { size });
    }
    let data = fs::read(path.as_ref())?;
    parse_document(&data)
}

/// Parse a JSON export from raw bytes.
///
/// The length check happens before the bytes are inspected.
///
/// # Errors
/// Same taxonomy as [`load_file`].
pub fn load_bytes(data: &[u8]) -> Result<Value> {
    let size = data.len() as u64;
    if size > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge { size });
    }
    parse_document(data)
}

fn parse_document(data: &[u8]) -> Result<Value> {
    // Invalid UTF-8 is reported by serde_json and lands in the same
    // "invalid JSON" category as any other malformed input.
    serde_json::from_slice(data).map_err(|e| {
        debug!("JSON parse failure: {e}");
        Error::InvalidJson(e)
    })
}
